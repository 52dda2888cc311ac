//! Error module
//!

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Status {
    #[error("This command needs the API, remove -f")]
    NeedsApi,
    #[error("No shelters: {0}")]
    NoShelters(String),
}
