//! Infrastructure adapters for Steward.
//!
//! Implements the ports defined in `steward-core` against concrete
//! technology: the settings store and guild repository over SQLite
//! (sqlx), and the TOML application config loader.

pub mod config;
pub mod sqlite;
