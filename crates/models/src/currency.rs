use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported transfer currencies.
///
/// `Unknown` marks both "not parsed yet" and "invalid input"; it never
/// round-trips through [`Currency::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Brl,
    Ars,
    Clp,
    Cop,
    Mxn,
    #[default]
    Unknown,
}

impl Currency {
    /// Every known currency, in declaration order.
    pub const ALL: [Currency; 8] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Brl,
        Currency::Ars,
        Currency::Clp,
        Currency::Cop,
        Currency::Mxn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Brl => "BRL",
            Currency::Ars => "ARS",
            Currency::Clp => "CLP",
            Currency::Cop => "COP",
            Currency::Mxn => "MXN",
            Currency::Unknown => "unknown",
        }
    }

    /// Exact, case-sensitive match against the canonical codes.
    /// Callers trim input themselves if they want to.
    pub fn parse(value: &str) -> Currency {
        match value {
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            "BRL" => Currency::Brl,
            "ARS" => Currency::Ars,
            "CLP" => Currency::Clp,
            "COP" => Currency::Cop,
            "MXN" => Currency::Mxn,
            _ => Currency::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Currency::Unknown)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Currency {
    fn from(value: String) -> Self {
        Currency::parse(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_currencies_round_trip() {
        for c in Currency::ALL {
            assert_eq!(Currency::parse(&c.to_string()), c, "round trip failed for {c:?}");
        }
    }

    #[test]
    fn unknown_renders_lowercase_and_does_not_round_trip() {
        assert_eq!(Currency::Unknown.to_string(), "unknown");
        assert_eq!(Currency::parse("unknown"), Currency::Unknown);
    }

    #[test]
    fn non_canonical_input_is_unknown() {
        for raw in ["", "usd", "Usd", " USD", "USD ", "US D", "JPY", "\t"] {
            assert_eq!(Currency::parse(raw), Currency::Unknown, "{raw:?} should be unknown");
        }
    }

    #[test]
    fn serde_uses_canonical_code() {
        let json = serde_json::to_string(&Currency::Brl).unwrap();
        assert_eq!(json, "\"BRL\"");
        let back: Currency = serde_json::from_str("\"MXN\"").unwrap();
        assert_eq!(back, Currency::Mxn);
        let bad: Currency = serde_json::from_str("\"mxn\"").unwrap();
        assert!(bad.is_unknown());
    }
}
