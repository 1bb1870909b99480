use milvus_core::MilvusError;
use thiserror::Error;

/// Client-side error types.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Field data error: {0}")]
    CoreError(#[from] MilvusError), // Marshalling failures, raised before any I/O

    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("RPC failed: {0}")]
    Rpc(#[from] tonic::Status),

    #[error("Server returned error code {code}: {reason}")]
    Server { code: i32, reason: String },

    #[error("Row count mismatch: field '{field}' has {actual} rows, expected {expected}")]
    RowCountMismatch { field: String, expected: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
