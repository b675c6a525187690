//! Echo executor - the reference command executor
//!
//! Classifies create/delete commands and formats them back to the caller.
//! Stands in for real domain logic behind the serialization point.

use tracing::debug;

use super::{Command, CommandExecutor, ExecutorError};

/// Reference executor for create/delete commands
#[derive(Debug, Default)]
pub struct EchoExecutor;

impl EchoExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for EchoExecutor {
    fn apply(&self, command: &Command) -> Result<String, ExecutorError> {
        debug!(kind = %command.kind, "applying echo command");
        let message = command.message.as_deref().unwrap_or("");
        match command.kind.as_str() {
            "create" => Ok(format!("SUCCESS create {message:?}")),
            "delete" => Ok(format!("SUCCESS delete {message:?}")),
            _ => Err(ExecutorError::UnknownKind {
                kind: command.kind.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(kind: &str, message: Option<&str>) -> Command {
        Command {
            kind: kind.to_string(),
            message: message.map(String::from),
        }
    }

    #[test]
    fn test_create_formats_quoted_message() {
        let result = EchoExecutor::new().apply(&command("create", Some("hello"))).unwrap();
        assert_eq!(result, "SUCCESS create \"hello\"");
    }

    #[test]
    fn test_delete_with_missing_message() {
        let result = EchoExecutor::new().apply(&command("delete", None)).unwrap();
        assert_eq!(result, "SUCCESS delete \"\"");
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let err = EchoExecutor::new().apply(&command("bogus", None)).unwrap_err();
        assert!(matches!(err, ExecutorError::UnknownKind { .. }));
        assert!(err.to_string().contains("bogus"));
    }
}
