use std::fmt;

use thiserror::Error;

/// Failure of a transfer operation. The variant is the error kind; the
/// payload is the human-readable message accumulated on the way up.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Reserved; nothing raises it yet.
    #[error("duplicated: {0}")]
    Duplicated(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Variant of a [`ServiceError`] without its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Duplicated,
    Timeout,
    Internal,
}

impl ServiceError {
    pub fn bad_request(msg: impl Into<String>) -> Self { Self::BadRequest(msg.into()) }

    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn internal(msg: impl Into<String>) -> Self { Self::Internal(msg.into()) }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::BadRequest(_) => ErrorKind::BadRequest,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Duplicated(_) => ErrorKind::Duplicated,
            ServiceError::Timeout(_) => ErrorKind::Timeout,
            ServiceError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ServiceError::BadRequest(m)
            | ServiceError::NotFound(m)
            | ServiceError::Duplicated(m)
            | ServiceError::Timeout(m)
            | ServiceError::Internal(m) => m,
        }
    }

    /// Prefix the message with `ctx`, keeping the kind.
    pub fn context(self, ctx: impl fmt::Display) -> Self {
        let wrap = |m: String| format!("{ctx}: {m}");
        match self {
            ServiceError::BadRequest(m) => ServiceError::BadRequest(wrap(m)),
            ServiceError::NotFound(m) => ServiceError::NotFound(wrap(m)),
            ServiceError::Duplicated(m) => ServiceError::Duplicated(wrap(m)),
            ServiceError::Timeout(m) => ServiceError::Timeout(wrap(m)),
            ServiceError::Internal(m) => ServiceError::Internal(wrap(m)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_kind_and_prefixes_message() {
        let e = ServiceError::not_found("transfer")
            .context("error getting transfer abc from repository");
        assert_eq!(e.kind(), ErrorKind::NotFound);
        assert_eq!(e.message(), "error getting transfer abc from repository: transfer not found");
        assert_eq!(
            e.to_string(),
            "not found: error getting transfer abc from repository: transfer not found"
        );
    }

    #[test]
    fn context_stacks() {
        let e = ServiceError::internal("socket closed").context("inner").context("outer");
        assert_eq!(e.kind(), ErrorKind::Internal);
        assert_eq!(e.message(), "outer: inner: socket closed");
    }
}
