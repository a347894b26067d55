use anyhow::Result;

use super::{
    CommandResult, CommandSummary,
    helper::{finish, migrate_project},
};
use crate::cli::args::CheckArgs;
use crate::config::load_config;

/// Dry-run the whole migration and fail when anything is still pending.
///
/// Intended as a CI gate: exit code 1 means there are files that `migrate
/// --apply` would rewrite, or call sites a human still has to look at.
pub fn check(cmd: CheckArgs) -> Result<CommandResult> {
    let root = cmd.common.path;
    let config = load_config(&root)?.config;

    let batch = migrate_project(&root, &config, false, cmd.common.verbose)?;

    Ok(finish(CommandSummary::Check, batch, true))
}
