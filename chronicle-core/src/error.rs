//! Error types for the chronicle core library.

use thiserror::Error;

use crate::types::AgentId;

/// Top-level error type for all chronicle operations.
///
/// Every mutating operation validates its input before touching the store,
/// so receiving an error always means the store is unchanged.
#[derive(Error, Debug)]
pub enum ChronicleError {
    /// An argument was outside its domain (negative age, out-of-range score...).
    #[error("Invalid argument `{what}`: {reason}")]
    InvalidArgument {
        /// Which argument or field was rejected.
        what: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A memory draft was missing a field the store requires.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The world driver has no agent with this id.
    #[error("Unknown agent: {0}")]
    UnknownAgent(AgentId),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChronicleError {
    /// Shorthand for building an [`ChronicleError::InvalidArgument`].
    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            what,
            reason: reason.into(),
        }
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, ChronicleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_message_names_the_field() {
        let err = ChronicleError::invalid("importance", "must be within [0, 100], got 140");
        let msg = err.to_string();
        assert!(msg.contains("importance"));
        assert!(msg.contains("140"));
    }

    #[test]
    fn unknown_agent_displays_id() {
        let err = ChronicleError::UnknownAgent(AgentId(7));
        assert_eq!(err.to_string(), "Unknown agent: agent #7");
    }
}
