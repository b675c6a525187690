//! Serialized command application
//!
//! The applier is a single-writer serialization point. Concurrent callers
//! submit commands; each gets a unique, roughly time-ordered id, enters a
//! bounded FIFO queue, and is executed strictly one at a time by a dedicated
//! worker task, with the result routed back to the submitting caller.
//!
//! - **IdGenerator:** unique, time-ordered request ids
//! - **Notifier:** correlates a request id with the waiting caller
//! - **Applier:** the bounded queue, the worker, and the bounded handshakes

mod config;
mod core;
mod error;
mod id;
mod notify;

pub use config::ApplierConfig;
pub use core::{Applier, ApplierStatus};
pub use error::ApplyError;
pub use id::IdGenerator;
pub use notify::Notifier;
