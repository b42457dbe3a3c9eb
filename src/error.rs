//! Error types for the pokedex
//!
//! The cache itself never fails; these cover the fetch glue and the REPL.

use reqwest::StatusCode;
use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for API fetches and terminal I/O.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Transport-level request failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Response failed with status code: {status} and body: {body}")]
    Status { status: StatusCode, body: String },

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PokedexError {
    /// Returns true when the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PokedexError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

// == Result Type Alias ==
/// Convenience Result type for the pokedex.
pub type Result<T> = std::result::Result<T, PokedexError>;
