// server/src/db/mod.rs

//! Database-backed store implementations.

pub mod postgres;

pub use postgres::PgStore;
