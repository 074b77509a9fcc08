use async_trait::async_trait;
use dashmap::DashMap;
use models::{Transfer, TransferUpdate};
use mongodb::bson::oid::ObjectId;

use crate::errors::ServiceError;
use crate::transfers::repository::{parse_object_id, TransferRepository};

/// In-process repository keyed by ObjectId.
///
/// Follows the MongoDB repository's contract exactly, so it backs the
/// `memory` storage mode and the service/router tests.
#[derive(Default)]
pub struct InMemoryTransferRepository {
    records: DashMap<ObjectId, Transfer>,
}

impl InMemoryTransferRepository {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

#[async_trait]
impl TransferRepository for InMemoryTransferRepository {
    async fn create(&self, transfer: &Transfer) -> Result<String, ServiceError> {
        let oid = ObjectId::new();
        let id = oid.to_hex();
        self.records.insert(oid, Transfer { id: id.clone(), ..transfer.clone() });
        Ok(id)
    }

    async fn get_by_id(&self, id: &str) -> Result<Transfer, ServiceError> {
        let oid = parse_object_id(id)?;
        self.records
            .get(&oid)
            .map(|r| r.value().clone())
            .ok_or_else(|| ServiceError::not_found("transfer"))
    }

    async fn update(&self, update: &TransferUpdate) -> Result<(), ServiceError> {
        let oid = parse_object_id(&update.id)?;
        let changes = update.changes();
        if changes.is_empty() {
            return Err(ServiceError::bad_request("no valid fields to update"));
        }
        let mut record = self
            .records
            .get_mut(&oid)
            .ok_or_else(|| ServiceError::not_found("transfer"))?;
        for change in &changes {
            record.apply(change);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let oid = parse_object_id(id)?;
        self.records
            .remove(&oid)
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("transfer"))
    }
}
