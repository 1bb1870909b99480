pub mod api_schema;
pub mod error;
pub mod field;
pub mod grpc_api;
pub mod utils;

// Re-export key types for easier use
pub use error::{MilvusError, MilvusResult};
pub use field::{Column, ColumnData, FieldElement};
pub use grpc_api::schema::{DataType, FieldData};
