// Rust code generated from ../proto/milvus.proto by tonic_build (see build.rs).
// Message types from the common and schema packages resolve to milvus-core.

pub mod milvus {
    tonic::include_proto!("milvus.proto.milvus"); // Matches the package name in milvus.proto
}

pub use milvus::milvus_service_client::MilvusServiceClient;
pub use milvus::milvus_service_server::{MilvusService as MilvusServiceRpc, MilvusServiceServer};
