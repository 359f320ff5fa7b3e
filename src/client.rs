use std::fmt;

use futures::future::BoxFuture;

use crate::connection::Connection;
use crate::cursor::QueryCursor;
use crate::errors::{HiveError, HiveResult};
use crate::rpc::{FieldSchema, HiveRpc, Table};
use crate::HiveConfig;

/// A client bound to one database on one HiveServer.
///
/// The client owns a single logical connection. Every method opens it for
/// the duration of the call and closes it again, unless the call happens
/// inside [`session`](HiveClient::session), in which case the connection
/// stays pinned open for the whole block. `&mut self` receivers keep use of
/// the shared open/close state sequential.
pub struct HiveClient<R> {
    conn: Connection<R>,
    db: String,
}

impl<R> fmt::Debug for HiveClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HiveClient")
            .field("conn", &self.conn)
            .field("db", &self.db)
            .finish()
    }
}

impl<R: HiveRpc> HiveClient<R> {
    /// Connect and verify that the configured database exists.
    ///
    /// The connection is opened for the check and closed again; later calls
    /// reopen it on demand. Any failure of the check surfaces as
    /// [`HiveError::DatabaseNotFound`].
    pub async fn connect(rpc: R, config: &HiveConfig) -> HiveResult<HiveClient<R>> {
        let mut client = HiveClient {
            conn: Connection::new(rpc, config.addr()),
            db: config.database.clone(),
        };
        let scope = client.conn.acquire().await?;
        let found = client.conn.rpc_mut().get_database(&client.db).await;
        client.conn.release(scope).await;
        match found {
            Ok(_) => Ok(client),
            Err(err) => {
                log::debug!("database check for {} failed: {}", client.db, err);
                Err(HiveError::DatabaseNotFound(client.db.clone()))
            }
        }
    }

    /// The database this client was bound to at construction.
    pub fn database(&self) -> &str {
        &self.db
    }

    /// Submit a HiveQL query and return a lazy cursor over its results.
    ///
    /// The result schema is fetched once, right after submission; its field
    /// order is the column order of every row the cursor yields. Rows are
    /// pulled in buffered batches as the cursor is consumed, so an
    /// arbitrarily large result set never sits in memory at once.
    pub async fn execute(&mut self, query: &str) -> HiveResult<QueryCursor<'_, R>> {
        let scope = self.conn.acquire().await?;
        log::debug!("executing: {}", query);
        let submitted = match self.conn.rpc_mut().execute(query).await {
            Ok(()) => self.conn.rpc_mut().get_schema().await,
            Err(err) => Err(err),
        };
        match submitted {
            Ok(schema) => {
                let fields = schema
                    .field_schemas
                    .into_iter()
                    .map(|field| field.name)
                    .collect();
                Ok(QueryCursor::new(&mut self.conn, scope, fields))
            }
            Err(err) => {
                self.conn.release(scope).await;
                Err(err.into())
            }
        }
    }

    /// Run a contiguous block of calls over one pinned connection.
    ///
    /// The connection opens once before `f` runs and closes once after it
    /// returns, error or not. Calls made inside the block perform no
    /// open/close of their own. Starting a session while the connection is
    /// already open fails with [`HiveError::SessionActive`].
    ///
    /// ```rust,ignore
    /// use futures::FutureExt;
    ///
    /// client
    ///     .session(|c| {
    ///         async move {
    ///             c.add_column("logs", "source", "string", None).await?;
    ///             let columns = c.get_columns("logs").await?;
    ///             Ok(columns.len())
    ///         }
    ///         .boxed()
    ///     })
    ///     .await?;
    /// ```
    pub async fn session<T, F>(&mut self, f: F) -> HiveResult<T>
    where
        F: for<'a> FnOnce(&'a mut HiveClient<R>) -> BoxFuture<'a, HiveResult<T>>,
    {
        self.conn.pin().await?;
        let out = f(self).await;
        self.conn.unpin().await;
        out
    }

    /// Get the metastore definition of a table.
    ///
    /// Any failure of the underlying call collapses to
    /// [`HiveError::TableNotFound`]; a missing table and a transport fault
    /// are indistinguishable here, as they are in the service's own client.
    pub async fn get_table(&mut self, table_name: &str) -> HiveResult<Table> {
        let scope = self.conn.acquire().await?;
        let found = self.fetch_table(table_name).await;
        self.conn.release(scope).await;
        found
    }

    /// Ordered `(name, type)` pairs for a table's columns.
    pub async fn get_columns(&mut self, table_name: &str) -> HiveResult<Vec<(String, String)>> {
        let table = self.get_table(table_name).await?;
        Ok(table
            .columns
            .into_iter()
            .map(|column| (column.name, column.data_type))
            .collect())
    }

    /// Append a column to a table.
    ///
    /// Fails with [`HiveError::ColumnAlreadyExists`] before submitting
    /// anything if the name is taken. The whole revised definition is
    /// round-tripped; there is no incremental add.
    pub async fn add_column(
        &mut self,
        table_name: &str,
        column_name: &str,
        data_type: &str,
        comment: Option<&str>,
    ) -> HiveResult<()> {
        let scope = self.conn.acquire().await?;
        let out = self
            .add_column_inner(table_name, column_name, data_type, comment)
            .await;
        self.conn.release(scope).await;
        out
    }

    /// Remove a column from a table.
    ///
    /// Fails with [`HiveError::ColumnNotFound`] before submitting anything
    /// if no column of that name exists.
    pub async fn remove_column(&mut self, table_name: &str, column_name: &str) -> HiveResult<()> {
        let scope = self.conn.acquire().await?;
        let out = self.remove_column_inner(table_name, column_name).await;
        self.conn.release(scope).await;
        out
    }

    /// Change a column's type.
    ///
    /// A column already of the requested type is left alone: no submit at
    /// all. Fails with [`HiveError::ColumnNotFound`] if the column is
    /// absent. A comment, when given, is applied along with the new type.
    pub async fn alter_column_type(
        &mut self,
        table_name: &str,
        column_name: &str,
        data_type: &str,
        comment: Option<&str>,
    ) -> HiveResult<()> {
        let scope = self.conn.acquire().await?;
        let out = self
            .alter_column_type_inner(table_name, column_name, data_type, comment)
            .await;
        self.conn.release(scope).await;
        out
    }

    async fn fetch_table(&mut self, table_name: &str) -> HiveResult<Table> {
        self.conn
            .rpc_mut()
            .get_table(&self.db, table_name)
            .await
            .map_err(|err| {
                log::debug!("get_table({}) failed: {}", table_name, err);
                HiveError::TableNotFound(table_name.to_owned())
            })
    }

    async fn add_column_inner(
        &mut self,
        table_name: &str,
        column_name: &str,
        data_type: &str,
        comment: Option<&str>,
    ) -> HiveResult<()> {
        let mut table = self.fetch_table(table_name).await?;
        if table.columns.iter().any(|column| column.name == column_name) {
            return Err(HiveError::ColumnAlreadyExists {
                table: table_name.to_owned(),
                column: column_name.to_owned(),
            });
        }
        let mut column = FieldSchema::new(column_name, data_type);
        if let Some(comment) = comment {
            column = column.with_comment(comment);
        }
        table.columns.push(column);
        self.conn
            .rpc_mut()
            .alter_table(&self.db, table_name, &table)
            .await?;
        Ok(())
    }

    async fn remove_column_inner(&mut self, table_name: &str, column_name: &str) -> HiveResult<()> {
        let mut table = self.fetch_table(table_name).await?;
        let before = table.columns.len();
        table.columns.retain(|column| column.name != column_name);
        if table.columns.len() == before {
            return Err(HiveError::ColumnNotFound {
                table: table_name.to_owned(),
                column: column_name.to_owned(),
            });
        }
        self.conn
            .rpc_mut()
            .alter_table(&self.db, table_name, &table)
            .await?;
        Ok(())
    }

    async fn alter_column_type_inner(
        &mut self,
        table_name: &str,
        column_name: &str,
        data_type: &str,
        comment: Option<&str>,
    ) -> HiveResult<()> {
        let mut table = self.fetch_table(table_name).await?;
        let column = table
            .columns
            .iter_mut()
            .find(|column| column.name == column_name)
            .ok_or_else(|| HiveError::ColumnNotFound {
                table: table_name.to_owned(),
                column: column_name.to_owned(),
            })?;
        if column.data_type == data_type {
            return Ok(());
        }
        column.data_type = data_type.to_owned();
        if let Some(comment) = comment {
            column.comment = Some(comment.to_owned());
        }
        self.conn
            .rpc_mut()
            .alter_table(&self.db, table_name, &table)
            .await?;
        Ok(())
    }
}
