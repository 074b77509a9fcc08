//! Service layer for transfer records.
//! - `transfers::service` holds the validation and mutation rules.
//! - `transfers::repository` is the persistence seam; `transfers::repo` has the
//!   MongoDB and in-memory implementations.
//! - Every failure is a [`errors::ServiceError`] whose kind survives wrapping.

pub mod errors;
pub mod transfers;
