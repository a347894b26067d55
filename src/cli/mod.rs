use anyhow::Result;

pub mod args;
pub mod commands;
mod exit_status;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use crate::report;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print_result(&result, verbose);

    Ok(exit_status_from_result(&result))
}

fn exit_status_from_result(result: &commands::CommandResult) -> ExitStatus {
    if result.error_count > 0 {
        return ExitStatus::Failure;
    }
    if result.fail_on_pending && (result.files_changed > 0 || result.warning_count > 0) {
        return ExitStatus::Failure;
    }
    ExitStatus::Success
}
