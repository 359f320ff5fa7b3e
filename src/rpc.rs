use async_trait::async_trait;

/// One column of a table definition, as the metastore stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    pub data_type: String,
    pub comment: Option<String>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> FieldSchema {
        FieldSchema {
            name: name.into(),
            data_type: data_type.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> FieldSchema {
        self.comment = Some(comment.into());
        self
    }
}

/// A table definition as round-tripped through `get_table`/`alter_table`.
///
/// Structural changes always resubmit the whole definition; the service has
/// no incremental column-update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub db: String,
    pub name: String,
    pub columns: Vec<FieldSchema>,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub name: String,
    pub description: Option<String>,
}

/// The result schema of a submitted query, field order as reported.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub field_schemas: Vec<FieldSchema>,
}

/// The generated Thrift service client, seen through the calls this crate
/// actually makes.
///
/// Implement this over your generated `ThriftHive` client and its transport.
/// `open`/`close` drive the transport; the rest delegate to the stub and
/// surface its `thrift::Error` untouched. This crate never retries and never
/// interprets the wire format itself.
///
/// `fetch_n` returns one string per row with fields joined by a literal tab,
/// exactly as the service sends them.
#[async_trait]
pub trait HiveRpc: Send {
    async fn open(&mut self, addr: &str) -> thrift::Result<()>;
    async fn close(&mut self) -> thrift::Result<()>;
    async fn get_database(&mut self, name: &str) -> thrift::Result<Database>;
    async fn execute(&mut self, query: &str) -> thrift::Result<()>;
    async fn get_schema(&mut self) -> thrift::Result<Schema>;
    async fn fetch_n(&mut self, count: i32) -> thrift::Result<Vec<String>>;
    async fn get_table(&mut self, db: &str, table: &str) -> thrift::Result<Table>;
    async fn alter_table(&mut self, db: &str, table: &str, definition: &Table)
        -> thrift::Result<()>;
}
