use crate::query::QuerySpec;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

/// The four-field row shape returned by the data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameRecord {
    pub gender: String,
    pub state: String,
    pub year: i64,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("warehouse unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
    #[error("warehouse query failed ({status}): {message}")]
    Query { status: StatusCode, message: String },
    #[error("malformed warehouse response: {0}")]
    Decode(String),
}

/// Client for the remote analytical warehouse. One call per query: submit
/// the SQL with its bound parameters, await completion, decode the rows.
/// Pooling, retries and query cost control are the warehouse's problem.
pub struct WarehouseClient {
    http: Client,
    query_url: Url,
    token: Option<String>,
}

impl WarehouseClient {
    pub fn new(http: Client, query_url: Url, token: Option<String>) -> Self {
        Self {
            http,
            query_url,
            token,
        }
    }

    pub async fn execute(&self, query: &QuerySpec) -> Result<Vec<NameRecord>, WarehouseError> {
        debug!(
            "Submitting query with {} bound parameter(s)",
            query.params.len()
        );
        let mut builder = self.http.post(self.query_url.clone()).json(query);
        if let Some(t) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {}", t));
        }
        let resp = builder.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_else(|_| "<no body>".into());
            error!("Warehouse rejected query ({}): {}", status, message);
            return Err(WarehouseError::Query { status, message });
        }

        let text = resp.text().await?;
        let body: Value = serde_json::from_str(&text)
            .map_err(|e| WarehouseError::Decode(format!("response is not valid JSON: {}", e)))?;
        let rows = body
            .get("rows")
            .and_then(Value::as_array)
            .ok_or_else(|| WarehouseError::Decode("response missing `rows` array".into()))?;
        rows.iter().map(decode_row).collect()
    }
}

fn decode_row(row: &Value) -> Result<NameRecord, WarehouseError> {
    let obj = row
        .as_object()
        .ok_or_else(|| WarehouseError::Decode("row is not an object".into()))?;
    Ok(NameRecord {
        gender: str_field(obj, "gender")?,
        state: str_field(obj, "state")?,
        year: int_field(obj, "year")?,
        name: str_field(obj, "name")?,
    })
}

fn str_field(obj: &serde_json::Map<String, Value>, field: &str) -> Result<String, WarehouseError> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .ok_or_else(|| WarehouseError::Decode(format!("missing or non-string field `{}`", field)))
}

fn int_field(obj: &serde_json::Map<String, Value>, field: &str) -> Result<i64, WarehouseError> {
    obj.get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| WarehouseError::Decode(format!("missing or non-integer field `{}`", field)))
}
