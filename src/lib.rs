//! Randomized table and data generation for TiDB/MySQL load testing.
//!
//! The library synthesizes a table schema (random column types behind a
//! fixed auto-increment primary key), renders batched INSERT statements of
//! random values, and drives a pool of parallel workers that push the rows
//! to a MySQL-compatible server. Statement execution and session acquisition
//! sit behind the [`executor`] traits so the whole engine can run against a
//! test double.

pub mod error;
pub mod executor;
pub mod insert;
pub mod partition;
pub mod populate;
pub mod schema;
pub mod value;

pub use error::PopulateError;
pub use executor::{ConnectionProvider, MySqlConnector, SqlExecutor};
pub use partition::{partition, Partition};
pub use populate::{PopulateConfig, PopulateReport, Populator};
pub use schema::{generate_create_table, ColumnSpec, ColumnType, ColumnTypeRegistry};
