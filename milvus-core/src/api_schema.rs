//! JSON envelopes for responses surfaced to callers.

use serde::{Deserialize, Serialize};

use crate::grpc_api::common::{ErrorCode, Status};

/// Status block shared by every Milvus response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    #[serde(default)]
    pub error_code: i32,
    #[serde(default)]
    pub reason: String,
}

impl ResponseStatus {
    pub fn is_success(&self) -> bool {
        self.error_code == ErrorCode::Success as i32
    }
}

// A missing status is how the server reports success on some older builds.
impl From<Option<Status>> for ResponseStatus {
    fn from(status: Option<Status>) -> Self {
        match status {
            Some(s) => ResponseStatus { error_code: s.error_code, reason: s.reason },
            None => ResponseStatus::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasPartitionResponse {
    pub status: ResponseStatus,
    pub value: bool,
}
