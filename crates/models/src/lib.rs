//! Domain entities shared by the service and server crates.
//! - `Currency` and `TransferState` are closed enumerations with an `Unknown` sentinel.
//! - `Transfer` is the persisted record; `TransferUpdate` is a partial update against it.

pub mod currency;
pub mod state;
pub mod transfer;

pub use currency::Currency;
pub use state::TransferState;
pub use transfer::{FieldChange, Transfer, TransferUpdate};
