//! Shell error taxonomy
//!
//! Validation and usage problems never surface here; handlers convert those
//! to advisory `CommandResult`s locally. These variants cover the conditions
//! the dispatcher and collaborators report to the caller.

use serde::{Deserialize, Serialize};

/// Result type for shell operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Shell operation errors
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum ShellError {
    /// No registered command matches the parsed name. Reported distinctly so
    /// callers never confuse a lookup miss with a handler's advisory result.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("Agent not available: {0}")]
    AgentUnavailable(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_message() {
        let err = ShellError::UnknownCommand("frobnicate".into());
        assert_eq!(err.to_string(), "Unknown command: frobnicate");
    }

    #[test]
    fn test_errors_round_trip_through_json() {
        let err = ShellError::SessionNotFound("run-42".into());
        let json = serde_json::to_string(&err).unwrap();
        let back: ShellError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), err.to_string());
    }
}
