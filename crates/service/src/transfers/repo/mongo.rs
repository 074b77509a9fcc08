use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use configs::MongoConfig;
use models::{Currency, FieldChange, Transfer, TransferState, TransferUpdate};
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::transfers::repository::{parse_object_id, TransferRepository};

/// Stored shape of a transfer document. Currency and state are stored as
/// their canonical codes through the enums' string serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransferDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    sender_id: String,
    receiver_id: String,
    currency: Currency,
    amount: f64,
    state: TransferState,
}

impl TransferDocument {
    fn from_transfer(t: &Transfer) -> Self {
        Self {
            id: None,
            sender_id: t.sender_id.clone(),
            receiver_id: t.receiver_id.clone(),
            currency: t.currency,
            amount: t.amount,
            state: t.state,
        }
    }

    // The store is trusted: unrecognized codes already decoded as `Unknown`.
    fn into_transfer(self, id: ObjectId) -> Transfer {
        Transfer {
            id: id.to_hex(),
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            currency: self.currency,
            amount: self.amount,
            state: self.state,
        }
    }
}

fn change_to_bson(change: &FieldChange) -> Bson {
    match change {
        FieldChange::SenderId(v) | FieldChange::ReceiverId(v) => Bson::String(v.clone()),
        FieldChange::Currency(c) => Bson::String(c.to_string()),
        FieldChange::Amount(a) => Bson::Double(*a),
        FieldChange::State(s) => Bson::String(s.to_string()),
    }
}

/// `$set` document holding only the supplied fields.
fn set_document(changes: &[FieldChange]) -> Document {
    let mut set = Document::new();
    for change in changes {
        set.insert(change.field(), change_to_bson(change));
    }
    set
}

/// Driver options for `cfg`: no retries, connect and server selection
/// bounded by `connect_timeout_secs`.
async fn client_options(cfg: &MongoConfig) -> Result<ClientOptions, ServiceError> {
    let uri = cfg.uri();
    let mut opts = ClientOptions::parse(uri.as_str())
        .await
        .map_err(|e| ServiceError::internal(format!("invalid MongoDB options: {e}")))?;
    opts.app_name = Some("transfers-api".into());
    opts.connect_timeout = Some(cfg.connect_timeout());
    opts.server_selection_timeout = Some(cfg.connect_timeout());
    opts.retry_reads = Some(false);
    opts.retry_writes = Some(false);
    // passed as-is, reserved characters need no escaping
    if let Some((username, password)) = cfg.credentials() {
        opts.credential = Some(
            Credential::builder()
                .username(username.to_string())
                .password(password.to_string())
                .source("admin".to_string())
                .build(),
        );
    }
    Ok(opts)
}

/// MongoDB-backed repository. Every call is bounded by the configured
/// operation timeout; the driver's own retries are disabled.
#[derive(Clone)]
pub struct MongoTransferRepository {
    collection: Collection<TransferDocument>,
    operation_timeout: Duration,
}

impl MongoTransferRepository {
    /// Connect and ping the deployment, bounded by `connect_timeout_secs`.
    pub async fn connect(cfg: &MongoConfig) -> Result<Self, ServiceError> {
        let connect_timeout = cfg.connect_timeout();
        let opts = client_options(cfg).await?;
        let client = Client::with_options(opts)
            .map_err(|e| ServiceError::internal(format!("error connecting to MongoDB: {e}")))?;
        let db = client.database(&cfg.database);
        tokio::time::timeout(connect_timeout, db.run_command(doc! { "ping": 1 }).into_future())
            .await
            .map_err(|_| ServiceError::Timeout(format!("MongoDB ping exceeded {connect_timeout:?}")))?
            .map_err(|e| ServiceError::internal(format!("error connecting to MongoDB: {e}")))?;
        info!(uri = %cfg.redacted_uri(), database = %cfg.database, collection = %cfg.collection, "mongodb connected");

        Ok(Self::from_client(&client, cfg))
    }

    /// Build on an existing client without pinging.
    pub fn from_client(client: &Client, cfg: &MongoConfig) -> Self {
        Self {
            collection: client.database(&cfg.database).collection(&cfg.collection),
            operation_timeout: cfg.operation_timeout(),
        }
    }

    async fn bounded<T, F>(&self, op: &str, fut: F) -> Result<T, ServiceError>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        tokio::time::timeout(self.operation_timeout, fut.into_future())
            .await
            .map_err(|_| ServiceError::Timeout(format!("{op} exceeded {:?}", self.operation_timeout)))?
            .map_err(|e| ServiceError::internal(format!("{op}: {e}")))
    }
}

#[async_trait]
impl TransferRepository for MongoTransferRepository {
    async fn create(&self, transfer: &Transfer) -> Result<String, ServiceError> {
        let document = TransferDocument::from_transfer(transfer);
        let res = self
            .bounded("error inserting transfer in MongoDB", self.collection.insert_one(&document))
            .await?;
        let oid = res
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ServiceError::internal("inserted id is not an ObjectId"))?;
        debug!(id = %oid, "transfer inserted");
        Ok(oid.to_hex())
    }

    async fn get_by_id(&self, id: &str) -> Result<Transfer, ServiceError> {
        let oid = parse_object_id(id)?;
        let found = self
            .bounded("error getting transfer", self.collection.find_one(doc! { "_id": oid }))
            .await?;
        match found {
            Some(document) => Ok(document.into_transfer(oid)),
            None => Err(ServiceError::not_found("transfer")),
        }
    }

    async fn update(&self, update: &TransferUpdate) -> Result<(), ServiceError> {
        let oid = parse_object_id(&update.id)?;
        let changes = update.changes();
        if changes.is_empty() {
            return Err(ServiceError::bad_request("no valid fields to update"));
        }
        let res = self
            .bounded(
                "error updating transfer",
                self.collection
                    .update_one(doc! { "_id": oid }, doc! { "$set": set_document(&changes) }),
            )
            .await?;
        if res.matched_count == 0 {
            return Err(ServiceError::not_found("transfer"));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let oid = parse_object_id(id)?;
        let res = self
            .bounded("error deleting transfer", self.collection.delete_one(doc! { "_id": oid }))
            .await?;
        if res.deleted_count == 0 {
            return Err(ServiceError::not_found("transfer"));
        }
        Ok(())
    }
}
