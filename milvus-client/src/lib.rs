pub mod client;
pub mod config;
pub mod error;
pub mod grpc_api; // Generated from proto/milvus.proto
pub mod models;
pub mod service;

pub use client::MilvusClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use models::{CompactionState, InsertResult, InsertedIds};
pub use service::MilvusService;

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG`, defaulting to `info` for
/// the client crates. Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("milvus_client=info,milvus_core=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
