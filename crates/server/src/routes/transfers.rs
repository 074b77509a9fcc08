use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use models::{Currency, Transfer, TransferState, TransferUpdate};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::errors::ApiError;
use crate::metrics::{track, track_rejected};
use crate::openapi::ErrorResponse;
use crate::routes::ServerState;

/// Missing fields decode as empty/zero and are rejected by the service.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateTransferRequest {
    pub sender_id: String,
    pub receiver_id: String,
    pub currency: String,
    pub amount: f64,
    pub state: String,
}

/// Every field is optional; blank strings count as not supplied.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateTransferRequest {
    pub sender_id: Option<String>,
    pub receiver_id: Option<String>,
    pub currency: Option<String>,
    pub amount: Option<f64>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct IdResponse {
    pub id: String,
}

#[derive(Debug, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct TransferResponse {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub currency: String,
    pub amount: f64,
    pub state: String,
}

impl From<Transfer> for TransferResponse {
    fn from(t: Transfer) -> Self {
        Self {
            id: t.id,
            sender_id: t.sender_id,
            receiver_id: t.receiver_id,
            currency: t.currency.to_string(),
            amount: t.amount,
            state: t.state.to_string(),
        }
    }
}

// Blank means "not supplied"; anything else must be a known code.
fn optional_currency(raw: Option<&str>) -> Result<Option<Currency>, ApiError> {
    match raw {
        Some(s) if !s.trim().is_empty() => match Currency::parse(s) {
            Currency::Unknown => Err(ApiError::bad_request(format!("invalid currency: {s}"))),
            c => Ok(Some(c)),
        },
        _ => Ok(None),
    }
}

fn optional_state(raw: Option<&str>) -> Result<Option<TransferState>, ApiError> {
    match raw {
        Some(s) if !s.trim().is_empty() => match TransferState::parse(s) {
            TransferState::Unknown => Err(ApiError::bad_request(format!("invalid state: {s}"))),
            st => Ok(Some(st)),
        },
        _ => Ok(None),
    }
}

#[utoipa::path(
    post, path = "/transfers", tag = "transfers",
    request_body = CreateTransferRequest,
    responses(
        (status = 201, description = "Created", body = IdResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 500, description = "Create Failed", body = ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CreateTransferRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let Json(req) = payload.inspect_err(|_| track_rejected("create"))?;

    let currency = Currency::parse(&req.currency);
    if currency.is_unknown() {
        track_rejected("create");
        return Err(ApiError::bad_request(format!("invalid currency: {}", req.currency)));
    }
    let transfer_state = optional_state(Some(&req.state))
        .inspect_err(|_| track_rejected("create"))?
        .unwrap_or(TransferState::Unknown);

    let transfer = Transfer {
        id: String::new(),
        sender_id: req.sender_id,
        receiver_id: req.receiver_id,
        currency,
        amount: req.amount,
        state: transfer_state,
    };
    let id = track("create", state.transfers.create(transfer).await)?;
    info!(%id, "created transfer");
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

#[utoipa::path(
    get, path = "/transfers/{id}", tag = "transfers",
    params(("id" = String, Path, description = "Transfer ID")),
    responses(
        (status = 200, description = "OK", body = TransferResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Not Found", body = ErrorResponse),
        (status = 500, description = "Get Failed", body = ErrorResponse)
    )
)]
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<TransferResponse>, ApiError> {
    let transfer = track("get", state.transfers.get_by_id(&id).await)?;
    Ok(Json(transfer.into()))
}

#[utoipa::path(
    put, path = "/transfers/{id}", tag = "transfers",
    params(("id" = String, Path, description = "Transfer ID")),
    request_body = UpdateTransferRequest,
    responses(
        (status = 200, description = "Updated", body = IdResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 404, description = "Not Found", body = ErrorResponse),
        (status = 500, description = "Update Failed", body = ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTransferRequest>, JsonRejection>,
) -> Result<Json<IdResponse>, ApiError> {
    let Json(req) = payload.inspect_err(|_| track_rejected("update"))?;
    let currency = optional_currency(req.currency.as_deref()).inspect_err(|_| track_rejected("update"))?;
    let transfer_state = optional_state(req.state.as_deref()).inspect_err(|_| track_rejected("update"))?;

    let update = TransferUpdate {
        id: id.clone(),
        sender_id: req.sender_id,
        receiver_id: req.receiver_id,
        currency,
        amount: req.amount,
        state: transfer_state,
    };
    track("update", state.transfers.update(update).await)?;
    info!(%id, "updated transfer");
    Ok(Json(IdResponse { id }))
}

#[utoipa::path(
    delete, path = "/transfers/{id}", tag = "transfers",
    params(("id" = String, Path, description = "Transfer ID")),
    responses(
        (status = 200, description = "Deleted", body = IdResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Not Found", body = ErrorResponse),
        (status = 500, description = "Delete Failed", body = ErrorResponse)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<IdResponse>, ApiError> {
    track("delete", state.transfers.delete(&id).await)?;
    info!(%id, "deleted transfer");
    Ok(Json(IdResponse { id }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_codes_are_not_supplied() {
        assert_eq!(optional_currency(None).unwrap(), None);
        assert_eq!(optional_currency(Some("  ")).unwrap(), None);
        assert_eq!(optional_currency(Some("EUR")).unwrap(), Some(Currency::Eur));
        assert_eq!(optional_state(Some("")).unwrap(), None);
        assert_eq!(optional_state(Some("failed")).unwrap(), Some(TransferState::Failed));
    }

    #[test]
    fn unknown_optional_codes_are_rejected() {
        let e = optional_currency(Some("eur")).unwrap_err();
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "invalid currency: eur");
        let e = optional_state(Some("Done")).unwrap_err();
        assert_eq!(e.message, "invalid state: Done");
    }

    #[test]
    fn response_renders_canonical_codes() {
        let t = Transfer {
            id: "abc".into(),
            sender_id: "A".into(),
            receiver_id: "B".into(),
            currency: Currency::Cop,
            amount: 1.5,
            state: TransferState::Cancelled,
        };
        let r = TransferResponse::from(t);
        assert_eq!(r.currency, "COP");
        assert_eq!(r.state, "cancelled");
    }
}
