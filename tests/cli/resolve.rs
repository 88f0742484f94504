use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, MODELS, run};

#[test]
fn test_resolve_interface() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("models.ts", MODELS)?;

    let out = run(test
        .command()
        .args(["resolve", "models.ts", "SquareConfig", "--field", "config", "--kind", "param"]))?;

    assert_eq!(out.code, Some(0));
    assert_eq!(
        out.stdout,
        "@apiParam {String} config.id `config.id`\n\
         @apiParam {String} [config.color] `config.color` - Fill color\n\
         @apiParam {Number} config.width `config.width`\n\
         @apiParam {Enum} config.shape `config.shape`\n"
    );
    assert_eq!(out.stderr, "");
    Ok(())
}

#[test]
fn test_resolve_native_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("models.ts", MODELS)?;

    let out = run(test.command().args([
        "resolve",
        "models.ts",
        "number",
        "--field",
        "count",
        "--description",
        "Number of squares",
    ]))?;

    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, "@apiSuccess {Number} count Number of squares\n");
    Ok(())
}

#[test]
fn test_resolve_missing_interface_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("models.ts", MODELS)?;

    let out = run(test.command().args(["resolve", "models.ts", "Nope"]))?;

    assert_eq!(out.code, Some(1));
    assert_eq!(out.stdout, "");
    assert!(out.stderr.contains("warning: Could not find interface «Nope»"));
    Ok(())
}

#[test]
fn test_resolve_missing_file_fails() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.command().args(["resolve", "missing.ts", "Thing"]))?;

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("warning: Could not load"));
    Ok(())
}
