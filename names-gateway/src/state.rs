use crate::config::{Config, Warehouse, DEFAULT_TABLE};
use crate::warehouse::WarehouseClient;
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

pub struct AppState {
    pub warehouse: WarehouseClient,
    pub table: String,
}

impl AppState {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let timeout = std::time::Duration::from_secs(cfg.warehouse.timeout_secs.unwrap_or(30));
        let mut builder = Client::builder().timeout(timeout);
        if let Some(secs) = cfg.warehouse.connect_timeout_secs {
            builder = builder.connect_timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;
        debug!("HTTP client created with timeout: {:?}", timeout);

        // Parse and validate the warehouse URL at startup. Url::join treats the
        // last path segment as a file unless it ends with '/', so normalize.
        let mut raw = cfg.warehouse.url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid warehouse URL '{}': {}", cfg.warehouse.url, e))?;
        let query_url = base
            .join("v1/query")
            .map_err(|e| anyhow::anyhow!("Invalid warehouse URL '{}': {}", cfg.warehouse.url, e))?;

        let token = resolve_token(&cfg.warehouse)?;
        if token.is_none() {
            warn!("No warehouse credentials configured; sending unauthenticated requests");
        }

        let table = cfg
            .warehouse
            .table
            .clone()
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        info!("Registered warehouse: url='{}' table='{}'", base, table);

        Ok(AppState {
            warehouse: WarehouseClient::new(client, query_url, token),
            table,
        })
    }
}

// Mirrors service-account-file-then-ambient credential discovery: an explicit
// token file is authoritative and must be readable; otherwise fall back to the
// inline token, then to the environment.
fn resolve_token(w: &Warehouse) -> anyhow::Result<Option<String>> {
    if let Some(path) = &w.token_file {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read warehouse token file '{}': {}", path, e)
        })?;
        return Ok(Some(raw.trim().to_string()));
    }
    if let Some(t) = &w.token {
        return Ok(Some(t.clone()));
    }
    Ok(std::env::var("WAREHOUSE_TOKEN").ok())
}
