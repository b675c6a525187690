//! Notifier - correlates request ids with waiting callers
//!
//! A registry of one-shot result slots keyed by request id. The submission
//! side registers a slot before enqueueing; the worker triggers it after the
//! executor runs. Each id is registered at most once and delivered at most
//! once.

use std::collections::HashMap;

use tokio::sync::{Mutex, oneshot};
use tracing::debug;

use super::error::ApplyError;

/// Correlation table from request id to a one-shot result slot
#[derive(Debug, Default)]
pub struct Notifier {
    pending: Mutex<HashMap<u64, oneshot::Sender<String>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Register a pending wait for `id` and return the receiving half.
    ///
    /// Fails with [`ApplyError::DuplicateId`] if a wait is already pending
    /// for this id.
    pub async fn register(&self, id: u64) -> Result<oneshot::Receiver<String>, ApplyError> {
        let mut pending = self.pending.lock().await;
        if pending.contains_key(&id) {
            return Err(ApplyError::DuplicateId { id });
        }

        let (tx, rx) = oneshot::channel();
        pending.insert(id, tx);
        debug!(id, "registered pending wait");
        Ok(rx)
    }

    /// Deliver `result` to whoever registered `id`, removing the entry.
    ///
    /// Fails with [`ApplyError::UnknownId`] if nothing is pending for `id`,
    /// including when a previous trigger already consumed the entry. A waiter
    /// that gave up before delivery is not an error; the result is dropped.
    pub async fn trigger(&self, id: u64, result: String) -> Result<(), ApplyError> {
        let tx = {
            let mut pending = self.pending.lock().await;
            pending.remove(&id).ok_or(ApplyError::UnknownId { id })?
        };

        // Delivery happens outside the lock so a slow consumer cannot stall
        // register/trigger calls for other ids.
        if tx.send(result).is_err() {
            debug!(id, "waiter gone before delivery");
        } else {
            debug!(id, "triggered");
        }
        Ok(())
    }

    /// Number of waits still pending.
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_trigger_delivers_once() {
        let notifier = Notifier::new();
        let rx = notifier.register(100).await.unwrap();

        notifier.trigger(100, "success".to_string()).await.unwrap();
        assert_eq!(rx.await.unwrap(), "success");

        // The entry was consumed; a second trigger has nothing to deliver to.
        let err = notifier.trigger(100, "again".to_string()).await.unwrap_err();
        assert!(matches!(err, ApplyError::UnknownId { id: 100 }));
    }

    #[tokio::test]
    async fn test_duplicate_register_fails() {
        let notifier = Notifier::new();
        let _rx = notifier.register(7).await.unwrap();

        let err = notifier.register(7).await.unwrap_err();
        assert!(matches!(err, ApplyError::DuplicateId { id: 7 }));
    }

    #[tokio::test]
    async fn test_trigger_without_register_fails() {
        let notifier = Notifier::new();
        let err = notifier.trigger(1, "x".to_string()).await.unwrap_err();
        assert!(matches!(err, ApplyError::UnknownId { id: 1 }));
    }

    #[tokio::test]
    async fn test_trigger_after_waiter_dropped_still_consumes_entry() {
        let notifier = Notifier::new();
        let rx = notifier.register(42).await.unwrap();
        drop(rx);

        notifier.trigger(42, "late".to_string()).await.unwrap();
        assert_eq!(notifier.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_register_same_id() {
        use std::sync::Arc;

        let notifier = Arc::new(Notifier::new());
        let a = tokio::spawn({
            let notifier = notifier.clone();
            async move { notifier.register(9).await }
        });
        let b = tokio::spawn({
            let notifier = notifier.clone();
            async move { notifier.register(9).await }
        });

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert!(a.is_ok() != b.is_ok(), "exactly one register should win");
        assert_eq!(notifier.pending_count().await, 1);
    }
}
