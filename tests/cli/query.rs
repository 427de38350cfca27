use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, run};

const STRINGS: &str = "\
-brand = Acme
emails = { $count ->
    [one] One email for { $user }
   *[other] { $count } emails for { $user }
}
summary = { emails } from { -brand }
    .title = { $mood ->
        [happy] Hooray
       *[sad] Oh
    }
greeting = { $mood ->
    [happy] Hi { $name }!
   *[sad] Oh.
}
    .title = Greeting for { $name }
";

fn project() -> Result<CliTest> {
    CliTest::with_file("strings/strings_en.ftl", STRINGS)
}

#[test]
fn test_params_follows_references() -> Result<()> {
    let test = project()?;

    let mut cmd = test.command();
    cmd.args(["params", "strings/strings_en.ftl", "summary"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));

    let params: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(
        params,
        json!([
            {
                "name": "count",
                "variants": [
                    { "type": "number", "value": "one" },
                    { "type": "number", "value": "other" }
                ]
            },
            {
                "name": "mood",
                "variants": ["happy", "sad"]
            },
            { "name": "user" }
        ])
    );

    Ok(())
}

#[test]
fn test_params_unknown_key() -> Result<()> {
    let test = project()?;

    let mut cmd = test.command();
    cmd.args(["params", "strings/strings_en.ftl", "nope"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("'nope' is not defined in strings/strings_en.ftl"));

    Ok(())
}

#[test]
fn test_refs() -> Result<()> {
    let test = project()?;

    let mut cmd = test.command();
    cmd.args(["refs", "strings/strings_en.ftl", "summary"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));

    let refs: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(refs, json!(["-brand", "emails"]));

    Ok(())
}

#[test]
fn test_refs_of_term() -> Result<()> {
    let test = project()?;

    let mut cmd = test.command();
    cmd.args(["refs", "strings/strings_en.ftl", "--", "-brand"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));
    assert_eq!(serde_json::from_str::<Value>(&output.stdout)?, json!([]));

    Ok(())
}

#[test]
fn test_patterns() -> Result<()> {
    let test = project()?;

    let mut cmd = test.command();
    cmd.args(["patterns", "strings/strings_en.ftl", "greeting"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "\
greeting: Hi name0!
greeting: Oh.
greeting.title: Greeting for name0
greeting.title: Greeting for name1
"
    );

    Ok(())
}

#[test]
fn test_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.args(["patterns", "nope_en.ftl", "greeting"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to read FTL file"));

    Ok(())
}
