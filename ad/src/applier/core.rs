//! Applier - serialized command execution
//!
//! A single worker task drains a bounded FIFO queue and runs each command
//! through the executor strictly one at a time. Callers submit through
//! [`Applier::apply`] and get their own result back via the notifier, with
//! independent bounds on how long they wait to enqueue and how long they
//! wait for the result.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::executor::{Command, CommandExecutor};

use super::config::ApplierConfig;
use super::error::ApplyError;
use super::id::IdGenerator;
use super::notify::Notifier;

/// Applier lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplierStatus {
    Stopped,
    Running,
    Stopping,
}

/// Channel ends moved into the worker task on start
struct WorkerChannels {
    request_rx: mpsc::Receiver<(u64, Command)>,
    stop_rx: mpsc::Receiver<()>,
    done_tx: oneshot::Sender<()>,
}

/// The serialization point: one worker, one queue, one command at a time
pub struct Applier {
    config: ApplierConfig,
    generator: IdGenerator,
    notifier: Arc<Notifier>,
    executor: Arc<dyn CommandExecutor>,

    request_tx: mpsc::Sender<(u64, Command)>,
    stop_tx: mpsc::Sender<()>,

    /// Taken by `start`; absent afterwards, so only one worker can ever exist
    channels: Mutex<Option<WorkerChannels>>,
    /// Taken by `stop` to await the worker's exit acknowledgement
    done_rx: Mutex<Option<oneshot::Receiver<()>>>,
    status: Mutex<ApplierStatus>,
}

impl Applier {
    /// Create a stopped applier around the given executor
    pub fn new(config: ApplierConfig, executor: Arc<dyn CommandExecutor>) -> Self {
        let member_id = config.member_id.unwrap_or_else(rand::random);
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();

        let (request_tx, request_rx) = mpsc::channel(config.queue_capacity.max(1));
        let (stop_tx, stop_rx) = mpsc::channel(1);
        let (done_tx, done_rx) = oneshot::channel();

        Self {
            generator: IdGenerator::new(member_id, since_epoch),
            notifier: Arc::new(Notifier::new()),
            executor,
            request_tx,
            stop_tx,
            channels: Mutex::new(Some(WorkerChannels {
                request_rx,
                stop_rx,
                done_tx,
            })),
            done_rx: Mutex::new(Some(done_rx)),
            status: Mutex::new(ApplierStatus::Stopped),
            config,
        }
    }

    /// Current lifecycle state
    pub async fn status(&self) -> ApplierStatus {
        *self.status.lock().await
    }

    /// Spawn the worker task.
    ///
    /// Fails with [`ApplyError::AlreadyStarted`] on a second call; restart
    /// after stop is not supported.
    pub async fn start(&self) -> Result<(), ApplyError> {
        let channels = self
            .channels
            .lock()
            .await
            .take()
            .ok_or(ApplyError::AlreadyStarted)?;

        let notifier = Arc::clone(&self.notifier);
        let executor = Arc::clone(&self.executor);
        tokio::spawn(run_worker(notifier, executor, channels));

        *self.status.lock().await = ApplierStatus::Running;
        info!("applier started");
        Ok(())
    }

    /// Stop the worker: signal it, then await its acknowledgement.
    ///
    /// Both handshakes are bounded by the configured shutdown grace period,
    /// so a wedged worker cannot hang the caller; it surfaces as
    /// [`ApplyError::ShutdownAckTimeout`] instead (or
    /// [`ApplyError::ShutdownSignalTimeout`] once the signal slot is full).
    /// Either timeout means the worker state is no longer trustworthy.
    pub async fn stop(&self) -> Result<(), ApplyError> {
        let grace = self.config.shutdown_grace();
        info!("stopping applier");
        *self.status.lock().await = ApplierStatus::Stopping;

        match timeout(grace, self.stop_tx.send(())).await {
            Ok(Ok(())) => debug!("stop signal accepted"),
            // Channel closed: the worker already exited on its own.
            Ok(Err(_)) => debug!("worker already gone"),
            Err(_) => return Err(ApplyError::ShutdownSignalTimeout { grace }),
        }

        let done_rx = self.done_rx.lock().await.take();
        if let Some(done_rx) = done_rx {
            // A dropped ack sender also means the worker is gone, which is
            // all this handshake needs to establish.
            if timeout(grace, done_rx).await.is_err() {
                return Err(ApplyError::ShutdownAckTimeout { grace });
            }
        }

        *self.status.lock().await = ApplierStatus::Stopped;
        info!("applier stopped");
        Ok(())
    }

    /// Submit a command and wait for its result.
    ///
    /// The enqueue and the wait for the result are bounded by independent
    /// windows of the configured request timeout. When the queue stays full
    /// past the first window, the caller receives a synthesized
    /// `failed to schedule` result through the normal delivery path rather
    /// than an error; errors are reserved for the scheduling machinery.
    ///
    /// Calling this before `start` parks the command in the queue until the
    /// completion window lapses.
    pub async fn apply(&self, command: Command) -> Result<String, ApplyError> {
        let request_timeout = self.config.request_timeout();
        let id = self.generator.next();
        let result_rx = self.notifier.register(id).await?;

        debug!(id, kind = %command.kind, "scheduling command");
        match timeout(request_timeout, self.request_tx.send((id, command))).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => return Err(ApplyError::ChannelClosed),
            Err(_) => {
                warn!(id, "queue did not accept the command within the submission window");
                self.notifier
                    .trigger(id, format!("failed to schedule {id} in time"))
                    .await?;
            }
        }

        match timeout(request_timeout, result_rx).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(_)) => Err(ApplyError::ChannelClosed),
            Err(_) => Err(ApplyError::CompletionTimeout {
                id,
                timeout: request_timeout,
            }),
        }
    }
}

/// Worker loop: strict FIFO, one command at a time.
///
/// An in-flight command always runs to completion; the stop signal is only
/// observed between commands. Commands still queued when the signal lands
/// are abandoned and their callers time out.
async fn run_worker(
    notifier: Arc<Notifier>,
    executor: Arc<dyn CommandExecutor>,
    channels: WorkerChannels,
) {
    let WorkerChannels {
        mut request_rx,
        mut stop_rx,
        done_tx,
    } = channels;

    info!("worker running");
    loop {
        let (id, command) = tokio::select! {
            Some(tuple) = request_rx.recv() => tuple,
            _ = stop_rx.recv() => {
                info!("worker received stop signal");
                break;
            }
        };

        let result = match executor.apply(&command) {
            Ok(result) => result,
            // A failing command degrades to a result string; the loop never faults.
            Err(e) => {
                warn!(id, error = %e, "command failed");
                format!("failed to apply {e}")
            }
        };

        if let Err(e) = notifier.trigger(id, result).await {
            // The caller may have given up and its entry is already gone.
            warn!(id, error = %e, "failed to trigger result");
        }
    }

    let _ = done_tx.send(());
    info!("worker exited");
}
