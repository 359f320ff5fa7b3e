use std::fmt;
use std::sync::Arc;

use futures::Stream;

use crate::connection::{Connection, Scope};
use crate::errors::{HiveError, HiveResult};
use crate::row::Row;
use crate::rpc::HiveRpc;

/// Thrift dislikes large reads, so results come over in fixed-size chunks.
const BATCH_SIZE: i32 = 500;

/// A forward-only cursor over the results of one `execute` call.
///
/// Rows are pulled lazily: at most one batch of 500 wire rows is buffered,
/// and the next batch is requested only once the buffered one is spent. The cursor ends when the service returns an empty batch; no fetch
/// is issued after that. Re-running the query is the only way to restart.
///
/// The cursor holds the scope its `execute` opened. Draining it (or calling
/// [`close`](QueryCursor::close)) releases the scope; inside a session the
/// release is a no-op and the connection stays pinned.
pub struct QueryCursor<'a, R: HiveRpc> {
    conn: &'a mut Connection<R>,
    scope: Option<Scope>,
    fields: Arc<[String]>,
    batch: std::vec::IntoIter<String>,
    done: bool,
}

impl<'a, R: HiveRpc> QueryCursor<'a, R> {
    pub(crate) fn new(
        conn: &'a mut Connection<R>,
        scope: Scope,
        fields: Vec<String>,
    ) -> QueryCursor<'a, R> {
        QueryCursor {
            conn,
            scope: Some(scope),
            fields: fields.into(),
            batch: Vec::new().into_iter(),
            done: false,
        }
    }

    /// Column names of the result set, in server order.
    pub fn columns(&self) -> &[String] {
        &self.fields
    }

    /// Pull the next row, fetching a fresh batch when the buffered one is
    /// spent. Returns `Ok(None)` once the service reports an empty batch.
    pub async fn next_row(&mut self) -> HiveResult<Option<Row>> {
        loop {
            if let Some(raw) = self.batch.next() {
                match self.parse(raw) {
                    Ok(row) => return Ok(Some(row)),
                    Err(err) => {
                        self.finish().await;
                        return Err(err);
                    }
                }
            }
            if self.done {
                return Ok(None);
            }
            match self.conn.rpc_mut().fetch_n(BATCH_SIZE).await {
                Ok(rows) if rows.is_empty() => {
                    self.finish().await;
                    return Ok(None);
                }
                Ok(rows) => {
                    log::debug!("fetched batch of {} rows", rows.len());
                    self.batch = rows.into_iter();
                }
                Err(err) => {
                    self.finish().await;
                    return Err(err.into());
                }
            }
        }
    }

    /// Stop early, releasing the scoped connection without draining the
    /// remaining batches.
    pub async fn close(mut self) {
        self.finish().await;
    }

    /// Adapt the cursor into a [`Stream`] of rows.
    pub fn into_stream(self) -> impl Stream<Item = HiveResult<Row>> + 'a {
        futures::stream::try_unfold(self, |mut cursor| async move {
            let row = cursor.next_row().await?;
            Ok(row.map(|row| (row, cursor)))
        })
    }

    fn parse(&self, raw: String) -> HiveResult<Row> {
        // Tab-delimited with no escaping; a tab inside a value shows up here
        // as a field-count mismatch.
        let values: Vec<String> = raw.split('\t').map(str::to_owned).collect();
        if values.len() != self.fields.len() {
            return Err(HiveError::MalformedRow {
                expected: self.fields.len(),
                found: values.len(),
            });
        }
        Ok(Row::new(self.fields.clone(), values))
    }

    async fn finish(&mut self) {
        self.done = true;
        if let Some(scope) = self.scope.take() {
            self.conn.release(scope).await;
        }
    }
}

impl<R: HiveRpc> fmt::Debug for QueryCursor<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCursor")
            .field("fields", &self.fields)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl<R: HiveRpc> Drop for QueryCursor<'_, R> {
    fn drop(&mut self) {
        if let Some(scope) = self.scope.take() {
            if scope.opened() {
                log::warn!("query cursor dropped before exhaustion; transport will reopen on next use");
                self.conn.abandon();
            }
        }
    }
}
