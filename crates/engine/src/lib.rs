//! `stockbook-engine` — Warehouse inventory ledger engine.
//!
//! Pure engine crate: every operation reads a store snapshot and returns a
//! new one. No IO dependencies.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod model;
pub mod resolve;
pub mod stats;

pub use error::LedgerError;
pub use ledger::{commit_movement, current_balance, delete_movement};
pub use model::{Client, Direction, Movement, MovementDraft, Product, Store};
pub use resolve::EntityResolver;
