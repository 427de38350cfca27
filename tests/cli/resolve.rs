use std::process::Command;

use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const LOCALES: &str = r#"{
  "es_MX": { "name": "Spanish (Mexico)", "localizedName": "Español (México)", "fallbackLocales": ["es"] },
  "es": { "name": "Spanish", "localizedName": "Español" }
}"#;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "strings/strings_en.ftl",
        "hello = Hello, { $name }!\nonly_en = English only\n",
    )?;
    test.write_file("strings/strings_es.ftl", "hello = ¡Hola, { $name }!\n")?;
    test.write_file("locales.json", LOCALES)?;
    test.write_file(".fluentcrc.json", r#"{ "localeData": "locales.json" }"#)?;
    Ok(test)
}

fn resolve(test: &CliTest, args: &[&str]) -> Command {
    let mut cmd = test.command();
    cmd.arg("resolve").args(args);
    cmd
}

#[test]
fn test_resolve_through_fallback_chain() -> Result<()> {
    let test = project()?;

    let output = run(resolve(&test, &["hello", "--locale", "es_MX", "--arg", "name=Ada"]))?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "¡Hola, Ada!\n");
    assert!(output.stderr.contains("resolved from es (chain: es_MX -> es -> en)"));

    Ok(())
}

#[test]
fn test_resolve_falls_back_to_base() -> Result<()> {
    let test = project()?;

    let output = run(resolve(&test, &["only_en", "-l", "es_MX"]))?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "English only\n");
    assert!(output.stderr.contains("resolved from en"));

    Ok(())
}

#[test]
fn test_resolve_exact_locale_is_silent() -> Result<()> {
    let test = project()?;

    let output = run(resolve(&test, &["hello", "-l", "en", "-a", "name=Bo"]))?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "Hello, Bo!\n");
    assert_eq!(output.stderr, "");

    Ok(())
}

#[test]
fn test_resolve_missing_argument_warns() -> Result<()> {
    let test = project()?;

    let output = run(resolve(&test, &["hello", "-l", "en"]))?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "Hello, {$name}!\n");
    assert!(output.stderr.contains("warning:"));

    Ok(())
}

#[test]
fn test_resolve_unknown_key() -> Result<()> {
    let test = project()?;

    let output = run(resolve(&test, &["nope", "-l", "en"]))?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("'nope' is not a message of the base locale 'en'"));

    Ok(())
}

#[test]
fn test_resolve_missing_across_chain() -> Result<()> {
    let test = CliTest::with_file("strings/strings_en.ftl", "hello = Hello\n")?;
    test.write_file(".fluentcrc.json", r#"{ "fallbackLocale": "fr" }"#)?;

    let output = run(resolve(&test, &["hello", "-l", "de"]))?;
    assert_eq!(output.code, Some(2));
    assert!(
        output
            .stderr
            .contains("no bundle has message 'hello' for locale 'de' (tried de -> fr)")
    );

    Ok(())
}

#[test]
fn test_resolve_strict_parse() -> Result<()> {
    let test = project()?;
    test.write_file("strings/strings_es.ftl", "hello = { $name\n")?;

    let output = run(resolve(&test, &["hello", "-l", "es"]))?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("syntax errors in locale 'es'"));

    Ok(())
}

#[test]
fn test_resolve_requires_name_with_several_resources() -> Result<()> {
    let test = project()?;
    test.write_file("strings/other_en.ftl", "x = X\n")?;

    let output = run(resolve(&test, &["hello", "-l", "en"]))?;
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("pick one with --name"));

    let output = run(resolve(&test, &["x", "-l", "en", "--name", "other"]))?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "X\n");

    Ok(())
}
