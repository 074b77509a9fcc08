use std::sync::Arc;

use configs::BusinessConfig;
use models::{Transfer, TransferUpdate};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::transfers::repository::TransferRepository;

/// Transfer business rules, independent of the web framework and the store.
#[derive(Clone)]
pub struct TransferService {
    repo: Arc<dyn TransferRepository>,
    business: BusinessConfig,
}

impl TransferService {
    pub fn new(repo: Arc<dyn TransferRepository>, business: BusinessConfig) -> Self {
        Self { repo, business }
    }

    /// Validate and store a new transfer, returning its id.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use configs::BusinessConfig;
    /// use models::{Currency, Transfer, TransferState};
    /// use service::transfers::{repo::InMemoryTransferRepository, TransferService};
    ///
    /// let svc = TransferService::new(Arc::new(InMemoryTransferRepository::new()), BusinessConfig::default());
    /// let transfer = Transfer {
    ///     sender_id: "A".into(),
    ///     receiver_id: "B".into(),
    ///     currency: Currency::Usd,
    ///     amount: 10.5,
    ///     state: TransferState::Pending,
    ///     ..Default::default()
    /// };
    /// let id = tokio_test::block_on(svc.create(transfer)).unwrap();
    /// assert!(!id.is_empty());
    /// ```
    #[instrument(skip(self, transfer), fields(currency = %transfer.currency, state = %transfer.state))]
    pub async fn create(&self, transfer: Transfer) -> Result<String, ServiceError> {
        if transfer.sender_id.trim().is_empty() {
            return Err(ServiceError::bad_request("sender_id is required"));
        }
        if transfer.receiver_id.trim().is_empty() {
            return Err(ServiceError::bad_request("receiver_id is required"));
        }
        if transfer.currency.is_unknown() {
            return Err(ServiceError::bad_request(format!("invalid currency {}", transfer.currency)));
        }
        self.check_amount(transfer.amount)?;
        if transfer.state.is_unknown() {
            return Err(ServiceError::bad_request("state is required"));
        }

        let id = self
            .repo
            .create(&transfer)
            .await
            .map_err(|e| e.context("error creating transfer in repository"))?;
        info!(%id, "transfer_created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Transfer, ServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| e.context(format!("error getting transfer {id} from repository")))
    }

    /// Merge the supplied fields of `update` into the stored record.
    #[instrument(skip(self, update), fields(id = %update.id))]
    pub async fn update(&self, update: TransferUpdate) -> Result<(), ServiceError> {
        if update.id.trim().is_empty() {
            return Err(ServiceError::bad_request("id is required"));
        }
        if update.is_empty() {
            return Err(ServiceError::bad_request(format!(
                "error updating transfer {}: no fields to update",
                update.id
            )));
        }
        if let Some(amount) = update.amount {
            self.check_amount(amount)?;
        }

        self.repo
            .update(&update)
            .await
            .map_err(|e| e.context(format!("error updating transfer {} in repository", update.id)))?;
        info!(id = %update.id, "transfer_updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| e.context(format!("error deleting transfer {id} from repository")))?;
        info!(%id, "transfer_deleted");
        Ok(())
    }

    // NaN fails the first comparison too.
    fn check_amount(&self, amount: f64) -> Result<(), ServiceError> {
        if !(amount > 0.0) {
            return Err(ServiceError::bad_request("amount should be greater than 0"));
        }
        if amount < self.business.transfer_min_amount {
            return Err(ServiceError::bad_request(format!(
                "amount should be at least {}",
                self.business.transfer_min_amount
            )));
        }
        Ok(())
    }
}
