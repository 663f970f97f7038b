//! Append-only check-in log.

pub mod store;

pub use store::{recent_history, CheckinStore, StoreError};
