//! Concurrent in-memory consignment storage.
//!
//! Every backend implements [`Repository`] and upholds the same contract:
//!
//! - **Append-only**: consignments are stored in insertion order and never
//!   reordered, removed or deduplicated.
//! - **Atomic writes**: concurrent `create` calls never interleave or get lost.
//! - **Snapshot reads**: `get_all` returns an owned copy that reflects the
//!   store at a single instant and is unaffected by later writes.
//!
//! ## Backends
//!
//! - [`LockRepository`] - `Vec` behind a reader-writer lock. Lowest latency;
//!   readers run in parallel with each other.
//! - [`ActorRepository`] - a single task owns the `Vec` and serializes all
//!   access through a command channel.

mod actor;
mod interface;
mod lock;

pub use actor::ActorRepository;
pub use interface::Repository;
pub use lock::LockRepository;

#[cfg(test)]
mod tests;
