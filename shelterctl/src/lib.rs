//! Library part of the `shelterctl` utility.
//!
//! The shelter model, the closest shelter selection and the API access are in the
//! `petshelter-shelters` crate, this is only the command-line glue.
//!

/// Re-export
///
pub use cli::*;
pub use cmds::*;
pub use config::*;
pub use error::*;

mod cli;
mod cmds;
mod config;
mod error;
