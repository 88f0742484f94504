use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, MODELS, run};

const ROUTES: &str = r#"
import { SquareConfig } from "./models";

/**
 * @api {post} /squares Create square
 * @apiName CreateSquare
 * @apiBodyInterface (./models.ts) {SquareConfig} square
 * @apiSuccessInterface (./models.ts) {Api.V1.Result}
 */
export function create(square: SquareConfig) {}

/**
 * @api {get} /squares List squares
 * @apiSuccessInterface (./models.ts) {SquareConfig[]} squares All squares
 */
export function list() {}
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file("src/models.ts", MODELS)?;
    test.write_file("src/routes.ts", ROUTES)?;
    Ok(test)
}

#[test]
fn test_expand_text() -> Result<()> {
    let test = project()?;
    let out = run(test.command().arg("expand"))?;

    assert_eq!(out.code, Some(0));
    assert_eq!(
        out.stdout,
        r#"src/routes.ts:4
@api {post} /squares Create square
@apiName CreateSquare
@apiBody {String} square.id `square.id`
@apiBody {String} [square.color] `square.color` - Fill color
@apiBody {Number} square.width `square.width`
@apiBody {Enum} square.shape `square.shape`
@apiSuccess {Boolean} ok `ok`

src/routes.ts:12
@api {get} /squares List squares
@apiSuccess {Object[]} squares All squares
@apiSuccess {String} squares.id `squares.id`
@apiSuccess {String} [squares.color] `squares.color` - Fill color
@apiSuccess {Number} squares.width `squares.width`
@apiSuccess {Enum} squares.shape `squares.shape`

"#
    );
    assert!(out.stderr.contains("Expanded 2 blocks in 2 source files"));
    Ok(())
}

#[test]
fn test_expand_json() -> Result<()> {
    let test = project()?;
    let out = run(test.command().args(["expand", "--format", "json"]))?;

    assert_eq!(out.code, Some(0));
    let files: Value = serde_json::from_str(&out.stdout)?;
    assert_eq!(files.as_array().map(Vec::len), Some(1));
    assert_eq!(files[0]["path"], "src/routes.ts");
    assert_eq!(files[0]["blocks"][1]["line"], 12);
    assert_eq!(
        files[0]["blocks"][1]["elements"][1]["content"],
        "{Object[]} squares All squares\n"
    );
    Ok(())
}

#[test]
fn test_warnings_and_deny_warnings() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/models.ts", MODELS)?;
    test.write_file(
        "src/routes.ts",
        r#"
/**
 * @api {get} /broken Broken
 * @apiSuccessInterface (./models.ts) {Api.V2.Result}
 * @apiParamInterface no braces
 */
export function broken() {}
"#,
    )?;

    let out = run(test.command().arg("expand"))?;
    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, "src/routes.ts:2\n@api {get} /broken Broken\n\n");
    assert!(out.stderr.contains("warning: Could not find namespace V2"));
    assert!(out.stderr.contains("warning: Could not parse values of element: no braces"));
    assert!(out.stderr.contains("(2 warnings)"));

    let denied = run(test.command().args(["expand", "--deny-warnings"]))?;
    assert_eq!(denied.code, Some(1));
    Ok(())
}

#[test]
fn test_config_includes_and_source_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app/api/models.ts", MODELS)?;
    test.write_file(
        "app/api/routes.ts",
        "/**\n * @api {get} /r R\n * @apiQueryInterface (./models.ts) {Base} q\n */\n",
    )?;
    test.write_file("app/.apidoctsrc.json", r#"{ "includes": ["api"] }"#)?;

    let out = run(test.command().args(["expand", "--source-root", "app"]))?;
    assert_eq!(out.code, Some(0));
    assert_eq!(
        out.stdout,
        "api/routes.ts:1\n@api {get} /r R\n@apiQuery {String} q.id `q.id`\n\n"
    );
    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".apidoctsrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let out = run(test.command().arg("expand"))?;
    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("Invalid glob pattern in 'ignores'"));
    Ok(())
}
