use crate::{Result, proto::Consignment};
use async_trait::async_trait;

/// A minimal interface for storing and listing consignments.
///
/// The trait is object safe so a service can hold an `Arc<dyn Repository>` and
/// be exercised against a substitute implementation in tests.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Appends `consignment` to the store and echoes it back.
    ///
    /// The returned value is the one that was passed in, not a transformed
    /// copy.
    ///
    /// # Errors
    ///
    /// In-memory backends only fail when they can no longer be reached (see
    /// [`Error`](crate::Error)).
    async fn create(&self, consignment: Consignment) -> Result<Consignment>;

    /// Returns every stored consignment in insertion order.
    ///
    /// The result is an independent snapshot: writes that happen after the
    /// call returns are never reflected in it.
    ///
    /// # Errors
    ///
    /// See [`Repository::create`].
    async fn get_all(&self) -> Result<Vec<Consignment>>;

    /// Stops accepting calls and releases background resources.
    ///
    /// Backends without background work have nothing to release, which is
    /// what the default does.
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}
