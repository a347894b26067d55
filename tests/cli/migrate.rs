use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run_capture};

const BASIC_MOMENT_FILE: &str = "\
import moment from 'moment';

export function timestamp() {
    return moment('2022-1-1', 'YYYY-MM-DD').format();
}
";

#[test]
fn dry_run_leaves_files_untouched() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", BASIC_MOMENT_FILE)?;

    let (stdout, code) = run_capture(&mut test.migrate_command());

    assert_eq!(code, Some(0));
    assert!(stdout.contains("1 of 1 files would change"));
    assert!(stdout.contains("--apply"));
    assert_eq!(test.read_file("src/app.ts")?, BASIC_MOMENT_FILE);
    Ok(())
}

#[test]
fn apply_rewrites_imports_and_calls() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", BASIC_MOMENT_FILE)?;

    let (stdout, code) = run_capture(test.migrate_command().arg("--apply"));

    assert_eq!(code, Some(0));
    assert!(stdout.contains("Migrated 1 of 1 files"));

    let rewritten = test.read_file("src/app.ts")?;
    assert!(rewritten.contains("import dayjs from \"dayjs\""));
    assert!(rewritten.contains("dayjs('2022-1-1', 'YYYY-MM-DD').format()"));
    assert!(!rewritten.contains("moment"));
    Ok(())
}

#[test]
fn apply_reports_required_plugins() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", BASIC_MOMENT_FILE)?;

    let (stdout, _) = run_capture(test.migrate_command().arg("--apply"));

    assert!(stdout.contains("Required Day.js plugins: customParseFormat"));
    assert!(stdout.contains("import customParseFormat from 'dayjs/plugin/customParseFormat';"));
    assert!(stdout.contains("dayjs.extend(customParseFormat);"));
    Ok(())
}

#[test]
fn apply_reports_required_locales() -> Result<()> {
    let test = CliTest::with_file(
        "src/locale.ts",
        "import moment from 'moment';\nimport 'moment/locale/zh-cn';\n",
    )?;

    let (stdout, _) = run_capture(test.migrate_command().arg("--apply"));

    assert!(stdout.contains("Required locales: zh-cn"));
    let rewritten = test.read_file("src/locale.ts")?;
    assert!(rewritten.contains("dayjs/locale/zh-cn"));
    Ok(())
}

#[test]
fn unrecognized_members_are_warned_and_kept() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.ts",
        "import moment from 'moment';\nmoment().fooBar();\n",
    )?;

    let (stdout, code) = run_capture(test.migrate_command().arg("--apply"));

    // Warnings do not fail the migrate command.
    assert_eq!(code, Some(0));
    assert!(stdout.contains("warning: `fooBar` has no Day.js mapping"));
    assert!(stdout.contains("src/app.ts:2:1"));

    let rewritten = test.read_file("src/app.ts")?;
    assert!(rewritten.contains("dayjs().fooBar()"));
    Ok(())
}

#[test]
fn untouched_files_are_not_reformatted() -> Result<()> {
    let content = "export const add = (a, b) => a + b;\n";
    let test = CliTest::with_file("src/math.js", content)?;

    let (stdout, code) = run_capture(test.migrate_command().arg("--apply"));

    assert_eq!(code, Some(0));
    assert!(stdout.contains("Migrated 0 of 1 files"));
    assert_eq!(test.read_file("src/math.js")?, content);
    Ok(())
}

#[test]
fn broken_files_are_skipped_with_an_error() -> Result<()> {
    let test = CliTest::with_file("src/bad.js", "export function broken() {")?;
    test.write_file("src/good.js", "const m = require('moment');\n")?;

    let (stdout, code) = run_capture(test.migrate_command().arg("--apply"));

    assert_eq!(code, Some(1));
    assert!(stdout.contains("error:"));
    assert!(stdout.contains("parse-error"));
    // The broken file is untouched; the good one is still migrated.
    assert_eq!(test.read_file("src/bad.js")?, "export function broken() {");
    assert!(test.read_file("src/good.js")?.contains("require(\"dayjs\")"));
    Ok(())
}

#[test]
fn migrate_twice_is_stable() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", BASIC_MOMENT_FILE)?;

    run_capture(test.migrate_command().arg("--apply"));
    let first = test.read_file("src/app.ts")?;

    let (stdout, _) = run_capture(test.migrate_command().arg("--apply"));
    assert!(stdout.contains("Migrated 0 of 1 files"));
    assert_eq!(test.read_file("src/app.ts")?, first);
    Ok(())
}

#[test]
fn config_ignores_are_honored() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".dayshiftrc.json",
        r#"{ "ignores": ["**/generated/**"] }"#,
    )?;
    test.write_file(
        "src/generated/api.ts",
        "import moment from 'moment';\nmoment();\n",
    )?;
    test.write_file("src/app.ts", BASIC_MOMENT_FILE)?;

    let (_, code) = run_capture(test.migrate_command().arg("--apply"));

    assert_eq!(code, Some(0));
    assert!(
        test.read_file("src/generated/api.ts")?
            .contains("import moment from 'moment'")
    );
    assert!(test.read_file("src/app.ts")?.contains("dayjs"));
    Ok(())
}

#[test]
fn help_lists_commands() -> Result<()> {
    let test = CliTest::new()?;

    let (stdout, code) = run_capture(test.command().arg("--help"));

    assert_eq!(code, Some(0));
    assert!(stdout.contains("migrate"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("init"));
    Ok(())
}
