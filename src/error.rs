//! Error types for the pokedex
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the cache, the PokeAPI client and the REPL.
#[derive(Error, Debug)]
pub enum Error {
    /// Cache interval must be greater than zero
    #[error("Invalid cache interval: must be greater than zero")]
    InvalidInterval,

    /// Transport-level failure talking to the API
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Response failed with status code {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected resource shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Command name not present in the registry
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Command invoked without a required argument
    #[error("Usage: {command} <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// Inspect on a pokemon that is not in the pokedex
    #[error("You have not caught {0}")]
    NotCaught(String),
}

// == Result Type Alias ==
/// Convenience Result type for the pokedex.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::InvalidInterval.to_string(),
            "Invalid cache interval: must be greater than zero"
        );
        assert_eq!(
            Error::Status {
                status: 404,
                body: "Not Found".to_string()
            }
            .to_string(),
            "Response failed with status code 404: Not Found"
        );
        assert_eq!(
            Error::MissingArgument {
                command: "explore",
                argument: "area"
            }
            .to_string(),
            "Usage: explore <area>"
        );
        assert_eq!(
            Error::NotCaught("pikachu".to_string()).to_string(),
            "You have not caught pikachu"
        );
    }

    #[test]
    fn test_decode_error_conversion() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = err.into();
        assert!(matches!(err, Error::Decode(_)));
    }
}
