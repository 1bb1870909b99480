use thiserror::Error;

/// The main result type for milvus-core operations.
pub type MilvusResult<T> = Result<T, MilvusError>;

/// Errors raised while building or marshalling field data.
///
/// All of these are local validation failures detected before any request
/// leaves the process; none of them is worth retrying.
#[derive(Error, Debug)]
pub enum MilvusError {
    #[error("Unsupported element type: {0}")]
    UnsupportedType(String),

    #[error("Invalid field name: {0}")]
    InvalidName(String),

    #[error("Field '{0}' has no data")]
    EmptyData(String),

    #[error("Invalid data type: {0}")]
    InvalidDataType(i32),

    #[error("Operation is not supported: {0}")]
    UnsupportedOperation(String),

    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error reading field data: {0}")]
    Io(#[from] std::io::Error),
}
