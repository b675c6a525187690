//! Command executor seam
//!
//! The apply loop treats the executor as an opaque synchronous capability:
//! exactly one call per dequeued command, never concurrent. Implementations
//! may therefore keep interior state without locking.

mod echo;

pub use echo::EchoExecutor;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A domain command submitted for serialized execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    /// Operation discriminator, e.g. "create" or "delete"
    pub kind: String,

    /// Optional operation payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Errors from a command executor
///
/// These never escape the apply loop as faults; the worker reports them back
/// to the submitting caller as a textual failure result.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("unknown command kind {kind:?}")]
    UnknownKind { kind: String },
}

/// Domain capability invoked once per dequeued command
pub trait CommandExecutor: Send + Sync {
    fn apply(&self, command: &Command) -> Result<String, ExecutorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_from_json() {
        let command: Command =
            serde_json::from_str(r#"{"kind":"create","message":"hello"}"#).unwrap();
        assert_eq!(command.kind, "create");
        assert_eq!(command.message.as_deref(), Some("hello"));
    }

    #[test]
    fn test_command_message_is_optional() {
        let command: Command = serde_json::from_str(r#"{"kind":"delete"}"#).unwrap();
        assert_eq!(command.kind, "delete");
        assert!(command.message.is_none());
    }

    #[test]
    fn test_unknown_kind_error_names_the_kind() {
        let err = ExecutorError::UnknownKind {
            kind: "bogus".to_string(),
        };
        assert!(err.to_string().contains("\"bogus\""));
    }
}
