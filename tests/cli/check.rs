use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_clean_sources() -> Result<()> {
    let test = CliTest::with_file(
        "strings/strings_en.ftl",
        "-brand = Acme\nhello = Hello from { -brand }\n",
    )?;
    test.write_file(
        "strings/strings_fr.ftl",
        "-brand = Acme\nhello = Bonjour de { -brand }\n",
    )?;

    let output = run(test.check_command())?;
    assert_eq!(output.code, Some(0));
    assert_eq!(
        output.stdout,
        "\u{2713} Checked 2 FTL files in 2 locales - no issues found\n"
    );

    Ok(())
}

#[test]
fn test_reports_every_rule() -> Result<()> {
    let test = CliTest::with_file(
        "strings/strings_en.ftl",
        "greeting = Hi { -missing }\nsign-in = Sign in\n",
    )?;
    test.write_file(
        "strings/strings_fr.ftl",
        "greeting = Salut\nextra = En trop\n",
    )?;

    let output = run(test.check_command())?;
    assert_eq!(output.code, Some(1));

    let stdout = &output.stdout;
    assert!(stdout.contains("error: \"-missing\"  undefined-term"));
    assert!(stdout.contains("--> ./strings/strings_en.ftl:1:17"));
    assert!(stdout.contains("= note: referenced from greeting"));
    assert!(stdout.contains("warning: \"sign-in\"  dashed-key"));
    assert!(stdout.contains("= hint: rename to sign_in"));
    assert!(stdout.contains("warning: \"extra\"  orphan-key"));
    assert!(stdout.contains("--> ./strings/strings_fr.ftl:2:1"));
    assert!(stdout.contains("3 problems (1 error, 2 warnings)"));

    Ok(())
}

#[test]
fn test_syntax_error() -> Result<()> {
    let test = CliTest::with_file("strings/strings_en.ftl", "ok = Fine\nbroken = { $y\n")?;

    let output = run(test.check_command())?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("syntax-error"));
    assert!(output.stdout.contains("./strings/strings_en.ftl:2:"));
    assert!(output.stdout.contains("broken = { $y"));

    Ok(())
}

#[test]
fn test_missing_sources_root() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.check_command())?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("does not exist"));
    assert!(output.stderr.contains("sourcesRoot"));

    Ok(())
}

#[test]
fn test_sources_root_flag() -> Result<()> {
    let test = CliTest::with_file("i18n/app_en.ftl", "a = A\n")?;

    let mut cmd = test.check_command();
    cmd.args(["--sources-root", "i18n"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Checked 1 FTL file in 1 locale"));

    Ok(())
}

#[test]
fn test_config_sources_root_and_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".fluentcrc.json",
        r#"{
         "sourcesRoot": "./i18n",
         "ignores": ["**/drafts/**"]
     }"#,
    )?;
    test.write_file("i18n/app_en.ftl", "a = A\n")?;
    test.write_file("i18n/drafts/app_de.ftl", "broken = {\n")?;

    let output = run(test.check_command())?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Checked 1 FTL file in 1 locale"));

    Ok(())
}

#[test]
fn test_base_locale_flag_changes_orphan_direction() -> Result<()> {
    let test = CliTest::with_file("strings/strings_en.ftl", "a = A\nb = B\n")?;
    test.write_file("strings/strings_fr.ftl", "a = A\n")?;

    let output = run(test.check_command())?;
    assert_eq!(output.code, Some(0));

    let mut cmd = test.check_command();
    cmd.args(["--base-locale", "fr"]);
    let output = run(cmd)?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("warning: \"b\"  orphan-key"));
    assert!(output.stdout.contains("= note: in en (\"B\"), not in fr"));

    Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".fluentcrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = run(test.check_command())?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_help_lists_commands() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("--help");
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));
    for command in ["check", "params", "refs", "hoist", "patterns", "resolve", "init"] {
        assert!(output.stdout.contains(command), "missing {command}");
    }

    Ok(())
}
