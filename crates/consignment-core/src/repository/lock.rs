use crate::{Repository, Result, proto::Consignment};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

/// A lock-based repository suitable for multi-threaded environments.
///
/// The consignments live in an [`Arc<RwLock<_>>`]: `create` takes the write
/// lock for the duration of a single push, `get_all` takes the read lock for
/// the duration of a clone. Any number of readers may copy concurrently, but
/// never while a writer holds the lock.
///
/// Cloning the repository yields another handle to the same store.
///
/// ## Recommended When
/// - You want the lowest possible latency
/// - Reads dominate writes
///
/// ## See Also
/// - [`ActorRepository`](crate::ActorRepository)
#[derive(Clone, Default)]
pub struct LockRepository {
    consignments: Arc<RwLock<Vec<Consignment>>>,
}

impl LockRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for LockRepository {
    #[cfg_attr(feature = "instrument", tracing::instrument(level = "trace", skip_all))]
    async fn create(&self, consignment: Consignment) -> Result<Consignment> {
        self.consignments.write().push(consignment.clone());
        Ok(consignment)
    }

    #[cfg_attr(feature = "instrument", tracing::instrument(level = "trace", skip_all))]
    async fn get_all(&self) -> Result<Vec<Consignment>> {
        // Copy under the read guard so the caller never aliases the live store.
        let snapshot = self.consignments.read().clone();
        Ok(snapshot)
    }
}
