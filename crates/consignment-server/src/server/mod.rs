//! Server-side components of the consignment service.
//!
//! ## Submodules
//!
//! - [`config`] - CLI/environment configuration and validation.
//! - [`service`] - gRPC service implementation over a shared repository.
//! - [`telemetry`] - Logging, tracing and metrics initialization.
//!
//! These components are wired together in the server's `main.rs`.

pub mod config;
pub mod service;
pub mod telemetry;
