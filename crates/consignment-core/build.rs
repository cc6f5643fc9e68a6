/// Builds the gRPC client and server code for `consignment.proto` using
/// `tonic-prost-build`.
///
/// Besides the message types and the `ShippingService` client/server bindings,
/// an encoded `FileDescriptorSet` is written next to the generated code so the
/// server can register it with the reflection service.
///
/// # Files and Paths
///
/// - Proto file: `proto/consignment.proto`
/// - Includes: `proto/`
/// - Descriptor: `$OUT_DIR/consignment_descriptor.bin`
///
/// # Panics
///
/// Panics if `OUT_DIR` is unset or code generation fails (for example when
/// `protoc` cannot be found).
use std::env;
use std::path::PathBuf;
fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("consignment_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();
    config.file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/consignment.proto"], &["proto"])
        .unwrap();
}
