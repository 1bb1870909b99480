//! Domain-level results returned by `MilvusClient`.

use serde::{Deserialize, Serialize};

use crate::grpc_api::milvus::{BoolResponse, MutationResult};
use milvus_core::api_schema::HasPartitionResponse;
use milvus_core::grpc_api::common;
use milvus_core::grpc_api::schema::{i_ds, IDs};
use milvus_core::MilvusError;

/// Progress of a manual compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompactionState {
    Undefined,
    Executing,
    Completed,
}

impl TryFrom<i32> for CompactionState {
    type Error = MilvusError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match common::CompactionState::try_from(code) {
            Ok(common::CompactionState::UndefiedState) => Ok(CompactionState::Undefined),
            Ok(common::CompactionState::Executing) => Ok(CompactionState::Executing),
            Ok(common::CompactionState::Completed) => Ok(CompactionState::Completed),
            Err(_) => Err(MilvusError::InvalidArgument(format!("Invalid compaction state value: {}", code))),
        }
    }
}

/// Primary keys assigned to inserted rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InsertedIds {
    Int64(Vec<i64>),
    String(Vec<String>),
    None,
}

impl From<Option<IDs>> for InsertedIds {
    fn from(ids: Option<IDs>) -> Self {
        match ids.and_then(|ids| ids.id_field) {
            Some(i_ds::IdField::IntId(longs)) => InsertedIds::Int64(longs.data),
            Some(i_ds::IdField::StrId(strings)) => InsertedIds::String(strings.data),
            None => InsertedIds::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertResult {
    pub insert_count: i64,
    pub ids: InsertedIds,
    /// Hybrid timestamp at which the rows became visible.
    pub timestamp: u64,
}

impl From<MutationResult> for InsertResult {
    fn from(result: MutationResult) -> Self {
        InsertResult {
            insert_count: result.insert_cnt,
            ids: result.ids.into(),
            timestamp: result.timestamp,
        }
    }
}

// `HasPartitionResponse` lives in core so it can be decoded from JSON without
// the generated service code.
impl From<BoolResponse> for HasPartitionResponse {
    fn from(response: BoolResponse) -> Self {
        HasPartitionResponse { status: response.status.into(), value: response.value }
    }
}
