//! Module to deal with pet shelters: what they are, where we get them from and which one is
//! the closest.
//!
//! The different submodules are:
//!
//! - `shelter`: the data model as sent by the API
//! - `closest`: nearest shelter selection
//! - `repository`/`remote`/`token`: access to the data (API, file or memory)
//! - `state`: state containers for a map view and a detail view
//!

// Re-export these modules for a shorted import path.
//
pub use closest::*;
pub use error::*;
pub use remote::*;
pub use repository::*;
pub use shelter::*;
pub use state::*;
pub use token::*;

#[macro_use]
mod macros;

mod closest;
mod error;
mod remote;
mod repository;
mod shelter;
mod state;
mod token;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
