//! Domain types for asset records and the rules that guard them.

pub mod asset;
pub mod errors;

pub use asset::{validate, Asset, ValidatedAsset};
pub use errors::ValidationError;
