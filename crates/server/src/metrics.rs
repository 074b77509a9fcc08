use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::errors::{ErrorKind, ServiceError};

// Prometheus metrics (default registry)
pub static TRANSFER_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "transfers_api_requests_total",
        "Transfer operations handled, by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register transfers_api_requests_total")
});

fn outcome<T>(res: &Result<T, ServiceError>) -> &'static str {
    match res {
        Ok(_) => "ok",
        Err(e) => match e.kind() {
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Duplicated | ErrorKind::Internal => "error",
        },
    }
}

/// Count a finished service call and hand the result back.
pub fn track<T>(operation: &str, res: Result<T, ServiceError>) -> Result<T, ServiceError> {
    TRANSFER_REQUESTS_TOTAL.with_label_values(&[operation, outcome(&res)]).inc();
    res
}

/// Count a request rejected before it reached the service.
pub fn track_rejected(operation: &str) {
    TRANSFER_REQUESTS_TOTAL.with_label_values(&[operation, "bad_request"]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
