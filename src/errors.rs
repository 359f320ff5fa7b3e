#[derive(thiserror::Error, Debug)]
pub enum HiveError {
    #[error("database {0} does not exist")]
    DatabaseNotFound(String),
    #[error("table {0} does not exist")]
    TableNotFound(String),
    #[error("table {table} already has column {column}")]
    ColumnAlreadyExists { table: String, column: String },
    #[error("table {table} does not have column {column}")]
    ColumnNotFound { table: String, column: String },
    #[error("a session is already active on this connection")]
    SessionActive,
    #[error("row has {found} fields but the result schema has {expected}")]
    MalformedRow { expected: usize, found: usize },
    #[error(transparent)]
    Rpc(#[from] thrift::Error),
}

pub type HiveResult<T> = Result<T, HiveError>;
