//! Service layer for asset records.
//! - `asset`: the asset manager and its operations.
//! - `storage`: the key-value store contract and its implementations.
//! - `errors`: the error kinds every operation reports.

pub mod asset;
pub mod errors;
pub mod storage;
