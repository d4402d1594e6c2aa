// Store persistence

pub mod store;

pub use store::{JsonStoreFile, StoreRepository};

/// Persisted store document version. Bump when the schema changes in a way
/// old documents can't satisfy through serde defaults.
pub const STORE_FORMAT_VERSION: u32 = 1;
