//! Asset resource management: the five record operations and their error rules.

pub mod body;
pub mod manager;

pub use body::RawBody;
pub use manager::{AssetManager, DeleteConfirmation};
