use utoipa::OpenApi;

use crate::routes::transfers::{CreateTransferRequest, IdResponse, TransferResponse, UpdateTransferRequest};

/// Body of every 4xx/5xx response.
#[derive(utoipa::ToSchema)]
pub struct ErrorResponse { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::transfers::create,
        crate::routes::transfers::get_by_id,
        crate::routes::transfers::update,
        crate::routes::transfers::delete,
    ),
    components(
        schemas(
            CreateTransferRequest,
            UpdateTransferRequest,
            IdResponse,
            TransferResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "transfers", description = "Transfer records"),
    )
)]
pub struct ApiDoc;
