//! Error types for the consignment repository and service.
//!
//! This module defines the central `Error` enum returned by every
//! [`Repository`](crate::Repository) operation. It implements
//! `From<Error>` for `tonic::Status` so the service layer can hand a
//! repository failure to the client untouched: the status message is the
//! error's `Display` text and nothing else is added.
//!
//! ## Error Cases
//! - `ChannelError`: The store task behind an actor-backed repository could not
//!   be reached or dropped its reply.
//! - `ServiceShutdown`: A call arrived after the repository was shut down.
//!
//! The in-memory lock backend never fails; the enum is `#[non_exhaustive]` so
//! a persistent backend can add its own cases later.

use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for repository operations.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Internal channel send/receive failure (e.g. the store task exited).
    #[error("Channel error: {context}")]
    ChannelError { context: String },

    /// The repository is shutting down and no longer accepts calls.
    #[error("Service is shutting down")]
    ServiceShutdown,
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        match err {
            Error::ChannelError { .. } => Status::internal(message),
            Error::ServiceShutdown => Status::unavailable(message),
        }
    }
}
