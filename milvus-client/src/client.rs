use chrono::{DateTime, Utc};
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, error, info};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::grpc_api::milvus::{
    GetCompactionStateRequest, HasPartitionRequest, InsertRequest, ManualCompactionRequest,
};
use crate::grpc_api::MilvusServiceClient;
use crate::models::{CompactionState, InsertResult};
use crate::service::MilvusService;
use milvus_core::api_schema::{HasPartitionResponse, ResponseStatus};
use milvus_core::grpc_api::common::Status;
use milvus_core::utils::optional_hybrid_timestamp;
use milvus_core::{Column, FieldData, MilvusError, MilvusResult};

/// Typed entry point for remote Milvus operations.
///
/// Every operation validates and marshals its arguments before the request is
/// sent, so a local failure never reaches the network.
#[derive(Debug, Clone)]
pub struct MilvusClient<S = MilvusServiceClient<Channel>> {
    service: S,
    config: ClientConfig,
}

impl MilvusClient<MilvusServiceClient<Channel>> {
    /// Connects to the endpoint named in `config`.
    pub async fn connect(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        info!(endpoint = %config.endpoint, database = %config.database, "Connecting to Milvus");
        let channel = Endpoint::from_shared(config.endpoint.clone())?
            .connect_timeout(config.connect_timeout)
            .connect()
            .await?;
        Ok(MilvusClient::with_service(MilvusServiceClient::new(channel), config))
    }
}

impl<S: MilvusService> MilvusClient<S> {
    pub fn with_service(service: S, config: ClientConfig) -> Self {
        MilvusClient { service, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Inserts one row per element of the given columns.
    ///
    /// All columns must be non-empty and of equal row count. An empty
    /// `partition_name` targets the collection's default partition.
    pub async fn insert(
        &self,
        collection_name: &str,
        partition_name: Option<&str>,
        columns: &[Column],
    ) -> ClientResult<InsertResult> {
        check_name("collection", collection_name)?;
        debug!(collection_name, partition_name = ?partition_name, num_fields = columns.len(), "Insert");

        let fields_data = columns.iter().map(Column::to_field_data).collect::<MilvusResult<Vec<FieldData>>>()?;
        let num_rows = common_row_count(columns)?;
        let num_rows = u32::try_from(num_rows)
            .map_err(|_| MilvusError::InvalidArgument(format!("too many rows for a single insert: {}", num_rows)))?;

        let request = InsertRequest {
            db_name: self.config.database.clone(),
            collection_name: collection_name.to_string(),
            partition_name: partition_name.unwrap_or_default().to_string(),
            fields_data,
            num_rows,
            ..Default::default()
        };

        let response = self.service.insert(request).await?;
        check_status("Insert", response.status.clone())?;
        let result = InsertResult::from(response);
        debug!(collection_name, insert_count = result.insert_count, "Insert succeeded");
        Ok(result)
    }

    pub async fn has_partition(&self, collection_name: &str, partition_name: &str) -> ClientResult<bool> {
        check_name("collection", collection_name)?;
        check_name("partition", partition_name)?;
        debug!(collection_name, partition_name, "Has partition");

        let request = HasPartitionRequest {
            db_name: self.config.database.clone(),
            collection_name: collection_name.to_string(),
            partition_name: partition_name.to_string(),
        };

        let response = HasPartitionResponse::from(self.service.has_partition(request).await?);
        debug!(response = ?response, "Has partition response");
        check_response_status("HasPartition", &response.status)?;
        Ok(response.value)
    }

    /// Triggers a manual compaction and returns its id.
    ///
    /// `timetravel` bounds the data the compaction may drop; `None` leaves the
    /// choice to the server.
    pub async fn manual_compaction(
        &self,
        collection_id: i64,
        timetravel: Option<DateTime<Utc>>,
    ) -> ClientResult<i64> {
        debug!(collection_id, timetravel = ?timetravel, "Manual compaction");

        let request = ManualCompactionRequest {
            collection_id,
            timetravel: optional_hybrid_timestamp(timetravel),
        };

        let response = self.service.manual_compaction(request).await?;
        check_status("ManualCompaction", response.status)?;
        Ok(response.compaction_id)
    }

    pub async fn get_compaction_state(&self, compaction_id: i64) -> ClientResult<CompactionState> {
        debug!(compaction_id, "Get compaction state");

        let request = GetCompactionStateRequest { compaction_id };
        let response = self.service.get_compaction_state(request).await?;
        check_status("GetCompactionState", response.status)?;
        Ok(CompactionState::try_from(response.state)?)
    }
}

fn check_name(kind: &str, name: &str) -> MilvusResult<()> {
    if name.is_empty() {
        return Err(MilvusError::InvalidArgument(format!("{} name cannot be empty", kind)));
    }
    Ok(())
}

/// Row count shared by every column, or an error naming the first outlier.
fn common_row_count(columns: &[Column]) -> ClientResult<usize> {
    let first = columns
        .first()
        .ok_or_else(|| MilvusError::InvalidArgument("insert requires at least one field".to_string()))?;
    let expected = first.row_count();
    for column in &columns[1..] {
        if column.row_count() != expected {
            return Err(ClientError::RowCountMismatch {
                field: column.name().to_string(),
                expected,
                actual: column.row_count(),
            });
        }
    }
    Ok(expected)
}

fn check_status(operation: &str, status: Option<Status>) -> ClientResult<()> {
    check_response_status(operation, &ResponseStatus::from(status))
}

fn check_response_status(operation: &str, status: &ResponseStatus) -> ClientResult<()> {
    if status.is_success() {
        return Ok(());
    }
    error!(operation, error_code = status.error_code, reason = %status.reason, "{} failed", operation);
    Err(ClientError::Server { code: status.error_code, reason: status.reason.clone() })
}
