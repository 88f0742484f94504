use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, MODELS, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["includes"], serde_json::json!(["src"]));
    assert_eq!(parsed["ignoreTestFiles"], Value::Bool(true));
    assert!(
        parsed.get("extensions").is_some(),
        "Config should have 'extensions' field"
    );
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.command().arg("init"))?;
    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, "\u{2713} Created .apidoctsrc.json\n");

    let content = test.read_file(".apidoctsrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".apidoctsrc.json", "{}")?;

    let out = run(test.command().arg("init"))?;
    assert_eq!(out.code, Some(2));
    assert_eq!(out.stderr, "Error: .apidoctsrc.json already exists\n");
    assert_eq!(test.read_file(".apidoctsrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    run(test.command().arg("init"))?;

    test.write_file("src/models.ts", MODELS)?;
    test.write_file(
        "src/routes.ts",
        "/**\n * @api {get} /r R\n * @apiSuccessInterface (./models.ts) {Base}\n */\n",
    )?;

    let out = run(test.command().args(["expand", "--deny-warnings"]))?;
    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("@apiSuccess {String} id `id`"));

    Ok(())
}
