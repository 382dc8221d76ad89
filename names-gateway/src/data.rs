use crate::api::ApiError;
use crate::query::{build_query, FilterSet};
use crate::state::AppState;
use crate::warehouse::NameRecord;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Raw query-string parameters for `/api/data`. Everything is optional and
/// arrives as text; validation happens in `into_filters`.
#[derive(Debug, Default, Deserialize)]
pub struct DataParams {
    pub gender: Option<String>,
    pub state: Option<String>,
    pub year: Option<String>,
    pub name: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub status: &'static str,
    pub count: usize,
    pub data: Vec<NameRecord>,
}

impl DataParams {
    /// Empty values count as absent, so `?gender=` applies no filter.
    /// Non-numeric `year` or `limit` is rejected here instead of being
    /// passed through to the warehouse.
    fn into_filters(self) -> Result<FilterSet, ApiError> {
        let year = match present(self.year) {
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
                ApiError::InvalidFilter(format!("year must be an integer, got '{}'", raw))
            })?),
            None => None,
        };
        let limit = match present(self.limit) {
            Some(raw) => Some(raw.parse::<u32>().map_err(|_| {
                ApiError::InvalidFilter(format!(
                    "limit must be a non-negative integer, got '{}'",
                    raw
                ))
            })?),
            None => None,
        };
        Ok(FilterSet {
            gender: present(self.gender),
            state: present(self.state),
            year,
            name: present(self.name),
            limit,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub async fn data_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DataParams>,
) -> Result<Json<DataResponse>, ApiError> {
    let filters = params.into_filters()?;
    let query = build_query(&filters, &state.table);
    info!("Executing query: {}", query.sql);

    let data = state.warehouse.execute(&query).await.map_err(|e| {
        error!("Error fetching data: {}", e);
        e
    })?;

    info!("Query returned {} row(s)", data.len());
    Ok(Json(DataResponse {
        status: "success",
        count: data.len(),
        data,
    }))
}
