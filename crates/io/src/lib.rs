// Import/export - CSV movements and balances, JSON backup

pub mod csv;
pub mod import;
pub mod json;

pub use import::{import_movements, ImportError, ImportOutcome};
pub use json::{backup_json, restore_json, BackupError};
