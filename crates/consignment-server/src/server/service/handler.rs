//! gRPC service implementation for storing and listing consignments.
//!
//! This module defines [`ConsignmentService`], the concrete implementation of
//! the [`ShippingService`] gRPC service defined in the protobuf schema. It is a
//! thin adapter: each RPC unwraps the request, makes exactly one
//! [`Repository`] call, and wraps the result in the response message.
//! Repository errors are converted to a `Status` without added context and
//! without retries.

use crate::server::{
    config::{RepositoryKind, ServerConfig},
    telemetry::{
        increment_consignments_created, increment_errors, increment_requests,
        record_call_duration, record_snapshot_size,
    },
};
use consignment_core::{
    ActorRepository, Error, LockRepository, Repository,
    proto::{
        Consignment, CreateResponse, GetAllRequest, GetAllResponse,
        shipping_service_server::ShippingService,
    },
};
use std::sync::Arc;
use std::time::Instant;
use tonic::{Request, Response, Status};

pub const CREATE_CONSIGNMENT: &str = "CreateConsignment";
pub const GET_CONSIGNMENTS: &str = "GetConsignments";

/// gRPC front for a shared consignment [`Repository`].
///
/// Cloning is cheap and every clone talks to the same repository, which lets
/// the transport hand a copy to each connection while shutdown is driven from
/// `main`.
#[derive(Clone)]
pub struct ConsignmentService {
    repo: Arc<dyn Repository>,
}

impl ConsignmentService {
    /// Creates a service backed by the repository selected in `config`.
    ///
    /// The actor backend spawns its store task here, so this must run inside
    /// the Tokio runtime.
    pub fn new(config: &ServerConfig) -> Self {
        let repo: Arc<dyn Repository> = match config.repository {
            RepositoryKind::Lock => Arc::new(LockRepository::new()),
            RepositoryKind::Actor => Arc::new(ActorRepository::new(config.actor_buffer_size)),
        };
        Self::with_repository(repo)
    }

    /// Creates a service over an existing repository.
    pub fn with_repository(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Shuts the underlying repository down; later calls fail with
    /// `UNAVAILABLE` on backends that support shutdown.
    pub async fn shutdown(&self) -> Result<(), Error> {
        self.repo.shutdown().await
    }
}

/// Converts a repository outcome into the RPC outcome, recording telemetry on
/// the way. The error itself passes through unchanged.
fn finish<T>(method: &'static str, start: Instant, result: Result<T, Error>) -> Result<T, Status> {
    record_call_duration(method, start.elapsed().as_secs_f64() * 1000.0);
    result.map_err(|e| {
        increment_errors(method);
        tracing::warn!(method, error = %e, "Repository call failed");
        Status::from(e)
    })
}

#[tonic::async_trait]
impl ShippingService for ConsignmentService {
    /// Stores the consignment and echoes it back with `created = true`.
    #[tracing::instrument(skip_all, name = "create_consignment")]
    async fn create_consignment(
        &self,
        req: Request<Consignment>,
    ) -> Result<Response<CreateResponse>, Status> {
        let start = Instant::now();
        increment_requests(CREATE_CONSIGNMENT);

        let consignment = finish(
            CREATE_CONSIGNMENT,
            start,
            self.repo.create(req.into_inner()).await,
        )?;
        increment_consignments_created();

        Ok(Response::new(CreateResponse {
            created: true,
            consignment: Some(consignment),
        }))
    }

    /// Returns a snapshot of every stored consignment in insertion order.
    #[tracing::instrument(skip_all, name = "get_consignments")]
    async fn get_consignments(
        &self,
        _req: Request<GetAllRequest>,
    ) -> Result<Response<GetAllResponse>, Status> {
        let start = Instant::now();
        increment_requests(GET_CONSIGNMENTS);

        let consignments = finish(GET_CONSIGNMENTS, start, self.repo.get_all().await)?;
        record_snapshot_size(consignments.len() as f64);
        tracing::debug!(count = consignments.len(), "Returning consignments");

        Ok(Response::new(GetAllResponse { consignments }))
    }
}
