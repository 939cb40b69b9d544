//! # disk-database
//!
//! PostgreSQL connection management, migrations, and the transactional
//! unit/history store used by the service layer. Two store backends are
//! provided: PostgreSQL and an in-process memory store.

pub mod connection;
pub mod error;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{
    MemoryUnitStore, PgUnitStore, TxMode, UnitStore, UnitTransaction, open_store,
};
