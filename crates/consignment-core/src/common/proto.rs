//! Generated protobuf messages and `ShippingService` bindings.
//!
//! Message types, the `shipping_service_server` module (server trait and
//! router adapter) and the `shipping_service_client` module all come from
//! `proto/consignment.proto` via the build script.

tonic::include_proto!("consignment");

/// Encoded `FileDescriptorSet` for `consignment.proto`, used to register the
/// service with gRPC server reflection.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("consignment_descriptor");
