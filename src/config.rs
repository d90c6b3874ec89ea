// ==========================================
// Sales Bulk Import - batch configuration
// ==========================================
// Limits and endpoint paths for one upload pass. Defaults match the
// operator workflow; the environment can override them per deployment.
// ==========================================

use serde::{Deserialize, Serialize};

/// Hard cap on spreadsheet rows per upload.
pub const DEFAULT_MAX_ROWS: usize = 2000;

/// Hard cap on distinct orders per upload.
pub const DEFAULT_MAX_ORDERS: usize = 500;

/// Sale-creation endpoint path.
pub const DEFAULT_SALES_PATH: &str = "/v1/venda";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Base URL of the accounting API, e.g. "https://api.example.com".
    pub api_base: String,
    /// POST path for creating one sale.
    pub sales_path: String,
    pub max_rows: usize,
    pub max_orders: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            sales_path: DEFAULT_SALES_PATH.to_string(),
            max_rows: DEFAULT_MAX_ROWS,
            max_orders: DEFAULT_MAX_ORDERS,
        }
    }
}

impl ImportConfig {
    /// Build a config from the environment:
    /// - SALES_API_BASE (required for live use)
    /// - SALES_API_SALES_PATH, SALES_IMPORT_MAX_ROWS, SALES_IMPORT_MAX_ORDERS
    pub fn from_env() -> Self {
        let mut config = Self {
            api_base: std::env::var("SALES_API_BASE").unwrap_or_default(),
            ..Self::default()
        };
        if let Ok(path) = std::env::var("SALES_API_SALES_PATH") {
            if !path.trim().is_empty() {
                config.sales_path = path;
            }
        }
        if let Some(n) = env_usize("SALES_IMPORT_MAX_ROWS") {
            config.max_rows = n;
        }
        if let Some(n) = env_usize("SALES_IMPORT_MAX_ORDERS") {
            config.max_orders = n;
        }
        config
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.max_rows, 2000);
        assert_eq!(config.max_orders, 500);
        assert_eq!(config.sales_path, "/v1/venda");
    }
}
