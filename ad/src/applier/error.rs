//! Applier error types

use std::time::Duration;
use thiserror::Error;

/// Errors from the scheduling layer
///
/// Executor failures are never represented here: the worker converts them
/// into ordinary result strings, so callers of `apply` only see an error when
/// the scheduling machinery itself failed.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("duplicate request id {id:#x}")]
    DuplicateId { id: u64 },

    #[error("unknown request id {id:#x}")]
    UnknownId { id: u64 },

    #[error("no result for request {id:#x} within {timeout:?}")]
    CompletionTimeout { id: u64, timeout: Duration },

    #[error("request channel closed")]
    ChannelClosed,

    #[error("applier already started")]
    AlreadyStarted,

    #[error("worker did not accept the stop signal within {grace:?}")]
    ShutdownSignalTimeout { grace: Duration },

    #[error("worker did not acknowledge shutdown within {grace:?}")]
    ShutdownAckTimeout { grace: Duration },
}
