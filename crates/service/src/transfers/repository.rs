use async_trait::async_trait;
use models::{Transfer, TransferUpdate};
use mongodb::bson::oid::ObjectId;

use crate::errors::ServiceError;

/// Persistence seam for transfers.
///
/// Implementations share the same contract:
/// - ids are 24-hex-character ObjectIds; anything else is `BadRequest`
/// - `update` writes only `TransferUpdate::changes()` and fails with `BadRequest`
///   when there are none, `NotFound` when no record matched
/// - `get_by_id` and `delete` fail with `NotFound` when no record exists
#[async_trait]
pub trait TransferRepository: Send + Sync {
    /// Store a new record and return its assigned id.
    async fn create(&self, transfer: &Transfer) -> Result<String, ServiceError>;
    async fn get_by_id(&self, id: &str) -> Result<Transfer, ServiceError>;
    async fn update(&self, update: &TransferUpdate) -> Result<(), ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

/// Parse a transfer id into the store's native identifier.
pub fn parse_object_id(id: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(id)
        .map_err(|e| ServiceError::bad_request(format!("error parsing transfer ID {id}: {e}")))
}
