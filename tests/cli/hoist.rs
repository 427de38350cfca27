use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, run};

const AUTHORING: &str = r#"{
  "greeting": { "select_mood": { "happy": "Hi!", "sad": "Oh." } },
  "screen": {
    "title": "Home",
    "welcome": "Welcome to { screen.title }"
  }
}"#;

#[test]
fn test_hoist_json() -> Result<()> {
    let test = CliTest::with_file("strings.json", AUTHORING)?;

    let mut cmd = test.command();
    cmd.args(["hoist", "strings.json"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));

    let hoisted: Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(
        hoisted,
        json!({
            "greeting": "{ $mood ->\n  [happy] Hi!\n  *[sad] Oh.\n}",
            "screen": {
                "title": "Home",
                "welcome": "Welcome to { screen.title }"
            }
        })
    );

    Ok(())
}

#[test]
fn test_hoist_ftl() -> Result<()> {
    let test = CliTest::with_file("strings.json", AUTHORING)?;

    let mut cmd = test.command();
    cmd.args(["hoist", "strings.json", "--ftl"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "\
greeting = { $mood ->
      [happy] Hi!
      *[sad] Oh.
    }
screen_title = Home
screen_welcome = Welcome to { screen_title }
"
    );

    Ok(())
}

#[test]
fn test_hoist_ftl_rejects_arrays() -> Result<()> {
    let test = CliTest::with_file("strings.json", r#"{ "menu": { "items": ["a", "b"] } }"#)?;

    let mut cmd = test.command();
    cmd.args(["hoist", "strings.json", "--ftl"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("arrays are not supported (at 'menu.items')"));

    Ok(())
}

#[test]
fn test_hoist_invalid_json() -> Result<()> {
    let test = CliTest::with_file("strings.json", "{ not json")?;

    let mut cmd = test.command();
    cmd.args(["hoist", "strings.json"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to parse JSON"));

    Ok(())
}
