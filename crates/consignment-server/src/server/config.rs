use anyhow::bail;
use clap::{Parser, ValueEnum};

/// Runtime configuration for the `consignment-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a `.env`
/// file is loaded first), then validated into a [`ServerConfig`].
#[derive(Parser, Debug, Clone)]
#[command(
    name = "consignment-server",
    version,
    about = "A gRPC service that stores shipping consignments in memory"
)]
pub struct CliArgs {
    /// Address to listen on (TCP or Unix socket path; use --uds for Unix socket).
    ///
    /// Example: "0.0.0.0:50051" or "/tmp/consignment.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:50051"))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,

    /// Storage backend holding the consignments.
    ///
    /// Environment variable: `REPOSITORY`
    #[arg(long, env = "REPOSITORY", value_enum, default_value_t = RepositoryKind::Lock)]
    pub repository: RepositoryKind,

    /// Capacity of the command channel in front of the actor backend.
    ///
    /// This is backpressure, and only with `--repository actor`: once this
    /// many commands are queued, RPC handlers wait for room instead of being
    /// rejected. The default lock backend has no queue and ignores it.
    ///
    /// Environment variable: `ACTOR_BUFFER_SIZE`
    #[arg(long, env = "ACTOR_BUFFER_SIZE", default_value_t = 64)]
    pub actor_buffer_size: usize,
}

/// Which [`Repository`](consignment_core::Repository) implementation to run.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    /// `Vec` behind a reader-writer lock.
    Lock,
    /// `Vec` owned by a single task and driven over a channel.
    Actor,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub uds: bool,
    pub repository: RepositoryKind,
    pub actor_buffer_size: usize,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.server_addr.trim().is_empty() {
            bail!("SERVER_ADDR must not be empty");
        }

        if args.actor_buffer_size == 0 {
            bail!("ACTOR_BUFFER_SIZE must be greater than 0");
        }

        Ok(Self {
            server_addr: args.server_addr,
            uds: args.uds,
            repository: args.repository,
            actor_buffer_size: args.actor_buffer_size,
        })
    }
}
