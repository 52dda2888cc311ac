use eyre::Result;
use tracing::info;

use petshelter_shelters::{list_shelters, list_types, Repository};

use crate::{Context, ListSubCommand};

/// `list types` is the only one not needing a context.
///
#[tracing::instrument(skip(ctx))]
pub fn list(ctx: Option<&Context>, cmd: ListSubCommand) -> Result<String> {
    match (cmd, ctx) {
        (ListSubCommand::Types, _) => {
            info!("Listing all types:");
            Ok(list_types())
        }
        (ListSubCommand::Shelters, Some(ctx)) => {
            info!("Listing all shelters:");
            let shelters = ctx.repo.get_all_shelters()?;
            Ok(list_shelters(&shelters))
        }
        (ListSubCommand::Tokens, Some(ctx)) => {
            info!("Listing all tokens:");
            ctx.tokens.list()
        }
        (cmd, None) => Err(eyre::eyre!("list {cmd:?} needs shelters")),
    }
}
