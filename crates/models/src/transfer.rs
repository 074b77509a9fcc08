use crate::{Currency, TransferState};

/// A money movement between two parties.
///
/// `id` is assigned by the store on creation and is empty before that.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transfer {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub currency: Currency,
    pub amount: f64,
    pub state: TransferState,
}

impl Transfer {
    /// Merge a single supplied field into this record.
    pub fn apply(&mut self, change: &FieldChange) {
        match change {
            FieldChange::SenderId(v) => self.sender_id = v.clone(),
            FieldChange::ReceiverId(v) => self.receiver_id = v.clone(),
            FieldChange::Currency(c) => self.currency = *c,
            FieldChange::Amount(a) => self.amount = *a,
            FieldChange::State(s) => self.state = *s,
        }
    }
}

/// Partial update of a stored transfer. `None` means "leave as stored".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransferUpdate {
    pub id: String,
    pub sender_id: Option<String>,
    pub receiver_id: Option<String>,
    pub currency: Option<Currency>,
    pub amount: Option<f64>,
    pub state: Option<TransferState>,
}

/// One field of a [`TransferUpdate`] that will actually be written.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    SenderId(String),
    ReceiverId(String),
    Currency(Currency),
    Amount(f64),
    State(TransferState),
}

impl FieldChange {
    /// Name of the stored field this change targets.
    pub fn field(&self) -> &'static str {
        match self {
            FieldChange::SenderId(_) => "sender_id",
            FieldChange::ReceiverId(_) => "receiver_id",
            FieldChange::Currency(_) => "currency",
            FieldChange::Amount(_) => "amount",
            FieldChange::State(_) => "state",
        }
    }
}

impl TransferUpdate {
    /// Supplied fields, in a fixed order.
    ///
    /// Blank strings and `Unknown` enumerations count as not supplied.
    /// Any `Some` amount counts as supplied, whatever its value.
    pub fn changes(&self) -> Vec<FieldChange> {
        let mut out = Vec::new();
        if let Some(v) = non_blank(&self.sender_id) {
            out.push(FieldChange::SenderId(v));
        }
        if let Some(v) = non_blank(&self.receiver_id) {
            out.push(FieldChange::ReceiverId(v));
        }
        if let Some(c) = self.currency.filter(|c| !c.is_unknown()) {
            out.push(FieldChange::Currency(c));
        }
        if let Some(a) = self.amount {
            out.push(FieldChange::Amount(a));
        }
        if let Some(s) = self.state.filter(|s| !s.is_unknown()) {
            out.push(FieldChange::State(s));
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }
}

fn non_blank(v: &Option<String>) -> Option<String> {
    v.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}
