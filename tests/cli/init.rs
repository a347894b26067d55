use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run_capture};

#[test]
fn init_creates_config_file() -> Result<()> {
    let test = CliTest::new()?;

    let (stdout, code) = run_capture(test.command().arg("init"));

    assert_eq!(code, Some(0));
    assert!(stdout.contains("Created .dayshiftrc.json"));

    let config = test.read_file(".dayshiftrc.json")?;
    assert!(config.contains("ignores"));
    assert!(config.contains("node_modules"));
    Ok(())
}

#[test]
fn init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".dayshiftrc.json", "{}")?;

    let (_, code) = run_capture(test.command().arg("init"));

    assert_eq!(code, Some(2));
    assert_eq!(test.read_file(".dayshiftrc.json")?, "{}");
    Ok(())
}
