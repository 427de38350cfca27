use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["sourcesRoot"], "./strings");
    assert_eq!(parsed["baseLocale"], "en");
    assert_eq!(parsed["fallbackLocale"], "en");
    assert!(parsed["ignores"].is_array());
    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let output = run(cmd)?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "\u{2713} Created .fluentcrc.json\n");

    assert!(test.root().join(".fluentcrc.json").exists());
    let content = test.read_file(".fluentcrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".fluentcrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let output = run(cmd)?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains(".fluentcrc.json already exists"));
    assert_eq!(test.read_file(".fluentcrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    run(cmd)?;

    test.write_file("strings/strings_en.ftl", "hello = Hello\n")?;

    let output = run(test.check_command())?;
    assert_eq!(
        output.code,
        Some(0),
        "Check command should work with initialized config. stderr: {}",
        output.stderr
    );

    Ok(())
}
