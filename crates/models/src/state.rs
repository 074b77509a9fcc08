use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a transfer. Same parsing rules as [`crate::Currency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransferState {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    #[default]
    Unknown,
}

impl TransferState {
    pub const ALL: [TransferState; 5] = [
        TransferState::Pending,
        TransferState::Processing,
        TransferState::Completed,
        TransferState::Failed,
        TransferState::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferState::Pending => "pending",
            TransferState::Processing => "processing",
            TransferState::Completed => "completed",
            TransferState::Failed => "failed",
            TransferState::Cancelled => "cancelled",
            TransferState::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> TransferState {
        match value {
            "pending" => TransferState::Pending,
            "processing" => TransferState::Processing,
            "completed" => TransferState::Completed,
            "failed" => TransferState::Failed,
            "cancelled" => TransferState::Cancelled,
            _ => TransferState::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TransferState::Unknown)
    }
}

impl fmt::Display for TransferState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TransferState {
    fn from(value: String) -> Self {
        TransferState::parse(&value)
    }
}

impl From<TransferState> for String {
    fn from(value: TransferState) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_round_trip() {
        for s in TransferState::ALL {
            assert_eq!(TransferState::parse(s.as_str()), s);
        }
    }

    #[test]
    fn parse_is_exact() {
        for raw in ["", " ", "Pending", "PENDING", " pending", "done", "unknown"] {
            assert!(TransferState::parse(raw).is_unknown(), "{raw:?} should be unknown");
        }
    }
}
