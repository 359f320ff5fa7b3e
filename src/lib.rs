//! A thin wrapper around a Thrift client for a Hive-style query service.
//!
//! This crate does not speak the wire protocol itself. You bring the
//! generated service client and implement [`HiveRpc`] over it; this crate
//! supplies the part that is easy to get wrong around it:
//!
//! - a connection lifecycle with one rule: every call runs inside an open
//!   transport that is closed again on every exit path, unless a
//!   [`session`](HiveClient::session) pins it open for a block of calls;
//! - a lazy [`QueryCursor`] that pulls query results in fixed-size batches,
//!   so a large result set is never resident all at once;
//! - whole-definition schema editing helpers (`add_column`,
//!   `remove_column`, `alter_column_type`) with their precondition checks.
//!
//! Example usage:
//!
//! ```rust,no_run
//! use light_hive_connector::async_trait::async_trait;
//! use light_hive_connector::thrift;
//! use light_hive_connector::{
//!     Database, HiveClient, HiveConfig, HiveError, HiveRpc, Schema, Table,
//! };
//!
//! // Your wrapper around the generated ThriftHive client and its transport.
//! struct Rpc;
//!
//! #[async_trait]
//! impl HiveRpc for Rpc {
//!     async fn open(&mut self, _addr: &str) -> thrift::Result<()> { unimplemented!() }
//!     async fn close(&mut self) -> thrift::Result<()> { unimplemented!() }
//!     async fn get_database(&mut self, _name: &str) -> thrift::Result<Database> { unimplemented!() }
//!     async fn execute(&mut self, _query: &str) -> thrift::Result<()> { unimplemented!() }
//!     async fn get_schema(&mut self) -> thrift::Result<Schema> { unimplemented!() }
//!     async fn fetch_n(&mut self, _count: i32) -> thrift::Result<Vec<String>> { unimplemented!() }
//!     async fn get_table(&mut self, _db: &str, _table: &str) -> thrift::Result<Table> { unimplemented!() }
//!     async fn alter_table(&mut self, _db: &str, _table: &str, _def: &Table) -> thrift::Result<()> { unimplemented!() }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), HiveError> {
//!     let config = HiveConfig {
//!         host: "warehouse.internal".into(),
//!         ..HiveConfig::default()
//!     };
//!     let mut client = HiveClient::connect(Rpc, &config).await?;
//!
//!     let mut cursor = client.execute("SELECT id, name FROM users").await?;
//!     while let Some(row) = cursor.next_row().await? {
//!         println!("{} -> {}", row.get("id").unwrap(), row.get("name").unwrap());
//!     }
//!     drop(cursor);
//!
//!     client.add_column("users", "email", "string", None).await?;
//!     Ok(())
//! }
//! ```
//!
//! Field values are surfaced as the raw strings the service sends,
//! tab-split per row; typed decoding is up to the caller.

mod client;
mod connection;
mod cursor;
mod errors;
mod row;
mod rpc;

pub use client::HiveClient;
pub use cursor::QueryCursor;
pub use errors::{HiveError, HiveResult};
pub use row::Row;
pub use rpc::{Database, FieldSchema, HiveRpc, Schema, Table};

pub use async_trait;
pub use thrift;

/// Where to connect and which database to bind to.
#[derive(Debug, Clone)]
pub struct HiveConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl Default for HiveConfig {
    fn default() -> Self {
        HiveConfig {
            host: "localhost".to_owned(),
            port: 10001,
            database: "default".to_owned(),
        }
    }
}

impl HiveConfig {
    pub(crate) fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
