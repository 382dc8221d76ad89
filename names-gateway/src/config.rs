use serde::Deserialize;
use std::fs;

/// Table queried when the config does not name one.
pub const DEFAULT_TABLE: &str = "dataform.usa_names_extract";

#[derive(Debug, Deserialize)]
pub struct Warehouse {
    pub url: String,
    // Fully-qualified table to query. Defaults to DEFAULT_TABLE.
    pub table: Option<String>,
    // Bearer token sent with every warehouse request. Resolution order:
    // token_file contents, then this inline value, then the WAREHOUSE_TOKEN
    // environment variable.
    pub token: Option<String>,
    pub token_file: Option<String>,
    // Request timeout in seconds for warehouse queries. Defaults to 30.
    pub timeout_secs: Option<u64>,
    // Connection timeout in seconds for establishing connections to the warehouse.
    // If not set, uses reqwest's default behavior (no specific connect timeout).
    pub connect_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub listen: Option<String>,
    pub warehouse: Warehouse,
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let cfg_str = fs::read_to_string(path)?;
        Ok(toml::from_str(&cfg_str)?)
    }
}
