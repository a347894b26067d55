use anyhow::Result;

use super::{
    CommandResult, CommandSummary, MigrateSummary,
    helper::{finish, migrate_project},
};
use crate::cli::args::MigrateArgs;
use crate::config::load_config;

pub fn migrate(cmd: MigrateArgs) -> Result<CommandResult> {
    let root = cmd.common.path;
    let config = load_config(&root)?.config;

    let batch = migrate_project(&root, &config, cmd.apply, cmd.common.verbose)?;

    Ok(finish(
        CommandSummary::Migrate(MigrateSummary {
            is_apply: cmd.apply,
        }),
        batch,
        false,
    ))
}
