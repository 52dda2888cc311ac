use thiserror::Error;

/// Custom error type for shelter access, allow us to differentiate between errors.
///
#[derive(Debug, Error, PartialEq)]
pub enum ShelterError {
    #[error("Bad coordinate {0}")]
    BadCoordinate(String),
    #[error("Decoding shelters: {0}")]
    Decoding(String),
    #[error("Empty pet shelter list")]
    EmptyList,
    #[error("HTTP Error: {0}")]
    HTTP(String),
    #[error("No credentials for {0}")]
    NoCredentials(String),
    #[error("No shelter with id {0}")]
    NotFound(String),
}

/// Custom error type for tokens.
///
#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("Empty token, not stored")]
    Empty,
    #[error("Invalid token in {0}")]
    Invalid(String),
    #[error("Error retrieving token from {0}")]
    Retrieval(String),
    #[error("Can not store token: {0}")]
    Storing(String),
}
