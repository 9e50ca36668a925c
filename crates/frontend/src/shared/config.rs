use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub table: TableConfig,
    #[serde(default)]
    pub options: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Backend port on the same host the dashboard is served from.
    pub port: u16,
    pub export_timeout_secs: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuthConfig {
    pub login_route: String,
    pub login_endpoint: String,
    /// API paths that work without a session.
    pub public_routes: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TableConfig {
    pub page_sizes: Vec<u32>,
    pub default_per_page: u32,
    pub search_debounce_ms: u32,
    pub csv_chunk_rows: usize,
    pub csv_yield_every: usize,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000
export_timeout_secs = 120

[auth]
login_route = "/login"
login_endpoint = "/api/auth/login"
public_routes = ["/api/auth/login", "/api/auth/forgot-password", "/api/auth/reset-password"]

[table]
page_sizes = [25, 50, 100]
default_per_page = 25
search_debounce_ms = 400
csv_chunk_rows = 100
csv_yield_every = 5

[options]
utm_sources = ["google", "facebook", "instagram", "linkedin", "youtube", "email", "direct", "referral"]
"#;

/// Parses the embedded configuration.
pub fn load_config() -> Result<AppConfig, toml::de::Error> {
    let config: AppConfig = toml::from_str(DEFAULT_CONFIG)?;
    log::debug!(
        "config loaded: api port {}, page sizes {:?}",
        config.api.port,
        config.table.page_sizes
    );
    Ok(config)
}

impl AppConfig {
    /// Option lists injected into a page's table spec.
    pub fn static_options(&self, keys: &[&str]) -> BTreeMap<String, Vec<String>> {
        keys.iter()
            .filter_map(|k| self.options.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = load_config().unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.api.export_timeout_secs, 120);
        assert_eq!(config.table.page_sizes, vec![25, 50, 100]);
        assert!(config.table.page_sizes.contains(&config.table.default_per_page));
        assert_eq!(config.table.search_debounce_ms, 400);
        assert_eq!(config.auth.login_route, "/login");
    }

    #[test]
    fn test_static_options_pick_known_keys() {
        let config = load_config().unwrap();
        let opts = config.static_options(&["utm_sources", "missing"]);
        assert_eq!(opts.len(), 1);
        assert!(opts["utm_sources"].contains(&"google".to_string()));
    }
}
