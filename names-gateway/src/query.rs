use serde::Serialize;
use serde_json::json;

pub const DEFAULT_LIMIT: u32 = 100;

/// Per-request filter values controlling which records are returned.
/// An absent field applies no filter.
#[derive(Debug, Default)]
pub struct FilterSet {
    pub gender: Option<String>,
    pub state: Option<String>,
    pub year: Option<i64>,
    pub name: Option<String>,
    pub limit: Option<u32>,
}

/// A SQL statement plus its bound parameters. Filter values never appear in
/// the SQL text; they travel out-of-band as named parameters. The only
/// inlined value is the limit, validated to an integer before it gets here.
#[derive(Debug, Serialize)]
pub struct QuerySpec {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

#[derive(Debug, Serialize)]
pub struct QueryParam {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: &'static str,
    pub value: serde_json::Value,
}

/// Build the SELECT for the names table. Predicates are appended in the
/// fixed order gender, state, year, name.
pub fn build_query(filters: &FilterSet, table: &str) -> QuerySpec {
    let mut sql = format!(
        "SELECT gender, state, year, name FROM `{}` WHERE 1=1",
        table
    );
    let mut params = Vec::new();

    if let Some(gender) = &filters.gender {
        sql.push_str(" AND gender = @gender");
        params.push(QueryParam {
            name: "gender",
            ty: "STRING",
            value: json!(gender),
        });
    }
    if let Some(state) = &filters.state {
        sql.push_str(" AND state = @state");
        params.push(QueryParam {
            name: "state",
            ty: "STRING",
            value: json!(state),
        });
    }
    if let Some(year) = filters.year {
        sql.push_str(" AND year = @year");
        params.push(QueryParam {
            name: "year",
            ty: "INT64",
            value: json!(year),
        });
    }
    if let Some(name) = &filters.name {
        // Substring match; the %-wrapped pattern is bound, not spliced in.
        sql.push_str(" AND name LIKE @name");
        params.push(QueryParam {
            name: "name",
            ty: "STRING",
            value: json!(format!("%{}%", name)),
        });
    }

    sql.push_str(" ORDER BY year, state, name");
    sql.push_str(&format!(" LIMIT {}", filters.limit.unwrap_or(DEFAULT_LIMIT)));

    QuerySpec { sql, params }
}
