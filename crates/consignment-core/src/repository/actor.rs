//! Channel-driven repository backed by a single owning task.
//!
//! The store task owns the `Vec<Consignment>` outright; callers never touch it.
//! Each call is turned into a [`Command`] carrying a `oneshot` reply sender and
//! pushed onto a bounded MPSC channel, so all reads and writes are applied one
//! at a time in arrival order. Shutdown is coordinated through a
//! [`CancellationToken`] and an acknowledged `Shutdown` command.

use crate::{Error, Repository, Result, proto::Consignment};
use async_trait::async_trait;
use core::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    time::timeout,
};
use tokio_util::sync::CancellationToken;

/// Upper bound on how long `shutdown` waits for the store task to acknowledge.
const SHUTDOWN_ACK_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug)]
enum Command {
    Create {
        consignment: Consignment,
        response: oneshot::Sender<Consignment>,
    },
    GetAll {
        response: oneshot::Sender<Vec<Consignment>>,
    },
    Shutdown {
        response: oneshot::Sender<()>,
    },
}

/// A repository whose state is owned by one background task.
///
/// ## Recommended When
/// - You prefer reasoning about a single owner over lock discipline
/// - You want queued writes to drain before shutdown completes
///
/// ## Runtime
///
/// [`ActorRepository::new`] spawns the store task with [`tokio::spawn`] and
/// must therefore be called from within a Tokio runtime.
///
/// ## See Also
/// - [`LockRepository`](crate::LockRepository)
#[derive(Clone)]
pub struct ActorRepository {
    commands: mpsc::Sender<Command>,
    shutdown_token: CancellationToken,
}

impl ActorRepository {
    /// Spawns the store task and returns a handle to it.
    ///
    /// `buffer_size` bounds how many commands may wait in the channel; once it
    /// is full, callers wait for room rather than being rejected.
    ///
    /// # Panics
    ///
    /// Panics if `buffer_size` is zero or if called outside a Tokio runtime.
    pub fn new(buffer_size: usize) -> Self {
        let (tx, rx) = mpsc::channel(buffer_size);
        tokio::spawn(store_loop(rx));
        Self {
            commands: tx,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Sends a command built around a fresh reply channel and awaits the reply.
    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        if self.shutdown_token.is_cancelled() {
            return Err(Error::ServiceShutdown);
        }

        let (tx, rx) = oneshot::channel();
        if self.commands.send(build(tx)).await.is_err() {
            return Err(self.unreachable("store task channel closed"));
        }
        rx.await
            .map_err(|_| self.unreachable("store task dropped the reply"))
    }

    fn unreachable(&self, context: &str) -> Error {
        if self.shutdown_token.is_cancelled() {
            Error::ServiceShutdown
        } else {
            Error::ChannelError {
                context: context.to_string(),
            }
        }
    }
}

#[async_trait]
impl Repository for ActorRepository {
    #[cfg_attr(feature = "instrument", tracing::instrument(level = "trace", skip_all))]
    async fn create(&self, consignment: Consignment) -> Result<Consignment> {
        self.request(|response| Command::Create {
            consignment,
            response,
        })
        .await
    }

    #[cfg_attr(feature = "instrument", tracing::instrument(level = "trace", skip_all))]
    async fn get_all(&self) -> Result<Vec<Consignment>> {
        self.request(|response| Command::GetAll { response }).await
    }

    /// Refuses new calls, lets already-queued commands drain, then stops the
    /// store task and waits up to three seconds for it to acknowledge.
    ///
    /// Calling this more than once is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelError`] if the store task is already gone, drops
    /// the acknowledgement, or does not acknowledge in time. New calls are
    /// refused either way.
    async fn shutdown(&self) -> Result<()> {
        if self.shutdown_token.is_cancelled() {
            return Ok(());
        }
        tracing::info!("Refusing new repository calls");
        self.shutdown_token.cancel();

        let (tx, rx) = oneshot::channel();
        if let Err(e) = self.commands.send(Command::Shutdown { response: tx }).await {
            tracing::error!("Failed to send shutdown to store task: {e}");
            return Err(Error::ChannelError {
                context: format!("failed to send shutdown to store task: {e}"),
            });
        }

        match timeout(SHUTDOWN_ACK_TIMEOUT, rx).await {
            Ok(Ok(())) => {
                tracing::debug!("Store task shutdown acknowledged");
                Ok(())
            }
            Ok(Err(e)) => {
                tracing::error!("Store task dropped shutdown acknowledgement: {e}");
                Err(Error::ChannelError {
                    context: format!("store task dropped shutdown acknowledgement: {e}"),
                })
            }
            Err(_) => {
                tracing::warn!("Store task shutdown timed out");
                Err(Error::ChannelError {
                    context: format!(
                        "store task did not acknowledge shutdown within {}s",
                        SHUTDOWN_ACK_TIMEOUT.as_secs()
                    ),
                })
            }
        }
    }
}

/// Owns the stored consignments and applies commands until told to stop or
/// until every handle has been dropped.
async fn store_loop(mut rx: mpsc::Receiver<Command>) {
    tracing::trace!("Store task started");
    let mut consignments: Vec<Consignment> = Vec::new();

    while let Some(command) = rx.recv().await {
        match command {
            Command::Create {
                consignment,
                response,
            } => {
                consignments.push(consignment.clone());
                // The append stands even if the caller has gone away.
                let _ = response.send(consignment);
            }
            Command::GetAll { response } => {
                let _ = response.send(consignments.clone());
            }
            Command::Shutdown { response } => {
                tracing::debug!(
                    "Store task received shutdown signal ({} consignments held)",
                    consignments.len()
                );
                if response.send(()).is_err() {
                    tracing::error!("Store task failed to acknowledge shutdown");
                }
                break;
            }
        }
    }

    tracing::trace!("Store task stopped");
}
