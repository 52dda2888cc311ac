use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::{info, trace};

use petshelter_common::{haversine, init_logging, Location};
use shelterctl::{
    edit_shelter, fetch_token, find_closest_shelter, list, show_shelter, Context,
    ListSubCommand, Opts, SubCommand,
};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    init_logging(NAME, opts.tree, opts.log_dir.clone())?;

    // Banner
    //
    banner()?;

    handle_subcmd(&opts)
}

pub fn handle_subcmd(opts: &Opts) -> Result<()> {
    match &opts.subcmd {
        // Handle `closest`
        //
        SubCommand::Closest(copts) => {
            trace!("closest");

            let ctx = Context::new(opts)?;
            println!("{}", find_closest_shelter(&ctx, copts)?);
        }

        // Handle `distance`, no shelters needed
        //
        SubCommand::Distance(dopts) => {
            trace!("distance");

            let from = Location::new(dopts.lat1, dopts.lon1);
            let to = Location::new(dopts.lat2, dopts.lon2);
            println!("{:.2} km", haversine(&from, &to));
        }

        // Handle `edit id`
        //
        SubCommand::Edit(eopts) => {
            trace!("edit");

            let ctx = Context::new(opts)?;
            let shelter = edit_shelter(&ctx, eopts)?;
            println!("{}", serde_json::to_string_pretty(&shelter)?);
        }

        // Handle `show id`
        //
        SubCommand::Show(sopts) => {
            trace!("show");

            let ctx = Context::new(opts)?;
            println!("{}", show_shelter(&ctx, &sopts.id)?);
        }

        // Handle `token`
        //
        SubCommand::Token => {
            trace!("token");

            let ctx = Context::new(opts)?;
            println!("{}", fetch_token(&ctx)?);
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // `list types` is standalone, the others need shelters or tokens
        //
        SubCommand::List(lopts) => {
            let str = match lopts.cmd {
                ListSubCommand::Types => list(None, lopts.cmd)?,
                _ => {
                    let ctx = Context::new(opts)?;
                    list(Some(&ctx), lopts.cmd)?
                }
            };
            println!("{}", str);
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            info!("versions");
            eprintln!("Modules: ");
            eprintln!("\t{}", petshelter_common::version());
            eprintln!("\t{}", petshelter_shelters::version());
        }
    }
    Ok(())
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
