use std::sync::Arc;

/// One query result record: the cursor's field names zipped against one
/// tab-split wire row.
///
/// Values are the raw strings the service sent; this layer does no type
/// coercion. Field order is the server-reported column order and is shared
/// (not copied) across every row of one cursor.
#[derive(Debug, Clone)]
pub struct Row {
    fields: Arc<[String]>,
    values: Vec<String>,
}

impl Row {
    pub(crate) fn new(fields: Arc<[String]>, values: Vec<String>) -> Row {
        Row { fields, values }
    }

    /// Column names, in server order.
    pub fn columns(&self) -> &[String] {
        &self.fields
    }

    /// Field values, positionally matching [`columns`](Row::columns).
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up a value by column name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .position(|field| field == name)
            .map(|ix| self.values[ix].as_str())
    }

    /// Iterate over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// Convert the row into a JSON object, keeping column order.
    pub fn json_object(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.iter()
                .map(|(name, value)| (name.to_owned(), serde_json::Value::String(value.to_owned())))
                .collect(),
        )
    }
}
