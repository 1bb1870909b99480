use async_trait::async_trait;
use tonic::transport::Channel;
use tonic::Status;

use crate::grpc_api::milvus::{
    BoolResponse, GetCompactionStateRequest, GetCompactionStateResponse, HasPartitionRequest,
    InsertRequest, ManualCompactionRequest, ManualCompactionResponse, MutationResult,
};
use crate::grpc_api::MilvusServiceClient;

/// The remote calls `MilvusClient` depends on.
///
/// Implemented for the tonic channel client; tests plug in an in-process fake.
#[async_trait]
pub trait MilvusService: Send + Sync {
    async fn insert(&self, request: InsertRequest) -> Result<MutationResult, Status>;
    async fn has_partition(&self, request: HasPartitionRequest) -> Result<BoolResponse, Status>;
    async fn manual_compaction(&self, request: ManualCompactionRequest) -> Result<ManualCompactionResponse, Status>;
    async fn get_compaction_state(
        &self,
        request: GetCompactionStateRequest,
    ) -> Result<GetCompactionStateResponse, Status>;
}

// Channels are cheap to clone; each call works on its own handle so the trait
// can take `&self`.
#[async_trait]
impl MilvusService for MilvusServiceClient<Channel> {
    async fn insert(&self, request: InsertRequest) -> Result<MutationResult, Status> {
        let mut client = self.clone();
        MilvusServiceClient::insert(&mut client, request).await.map(tonic::Response::into_inner)
    }

    async fn has_partition(&self, request: HasPartitionRequest) -> Result<BoolResponse, Status> {
        let mut client = self.clone();
        MilvusServiceClient::has_partition(&mut client, request).await.map(tonic::Response::into_inner)
    }

    async fn manual_compaction(&self, request: ManualCompactionRequest) -> Result<ManualCompactionResponse, Status> {
        let mut client = self.clone();
        MilvusServiceClient::manual_compaction(&mut client, request).await.map(tonic::Response::into_inner)
    }

    async fn get_compaction_state(
        &self,
        request: GetCompactionStateRequest,
    ) -> Result<GetCompactionStateResponse, Status> {
        let mut client = self.clone();
        MilvusServiceClient::get_compaction_state(&mut client, request).await.map(tonic::Response::into_inner)
    }
}
