use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run_capture};

#[test]
fn check_fails_when_migration_is_pending() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.ts",
        "import moment from 'moment';\nmoment().add(1, 'day');\n",
    )?;

    let (stdout, code) = run_capture(&mut test.check_command());

    assert_eq!(code, Some(1));
    assert!(stdout.contains("1 of 1 files still use moment"));
    // Check never writes.
    assert!(test.read_file("src/app.ts")?.contains("import moment"));
    Ok(())
}

#[test]
fn check_passes_on_a_clean_project() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.ts",
        "import dayjs from 'dayjs';\nexport const now = () => dayjs();\n",
    )?;

    let (stdout, code) = run_capture(&mut test.check_command());

    assert_eq!(code, Some(0));
    assert!(stdout.contains("nothing left to migrate"));
    Ok(())
}

#[test]
fn check_fails_on_unrecognized_patterns() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.ts",
        "import moment from 'moment';\nmoment().fooBar();\n",
    )?;

    let (stdout, code) = run_capture(&mut test.check_command());

    assert_eq!(code, Some(1));
    assert!(stdout.contains("`fooBar` has no Day.js mapping"));
    Ok(())
}
