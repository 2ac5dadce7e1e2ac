use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection URL, `postgres://...` or `sqlite:...`
    pub database_url: String,

    /// Address the HTTP server listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Number of clients shown per index page
    #[serde(default = "default_page_size")]
    pub page_size: i64,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Insert the sample roster when the clients table is empty
    #[serde(default = "default_seed_data")]
    pub seed_data: bool,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_page_size() -> i64 {
    10
}

fn default_max_connections() -> u32 {
    5
}

fn default_seed_data() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Build a configuration from an explicit set of variables instead of the
    /// process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)?;
        Ok(config)
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    let config = Config::load()?;

    tracing::debug!(bind_addr = %config.bind_addr, page_size = config.page_size, "configuration loaded");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = Config::from_vars(vars(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();

        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.max_connections, 5);
        assert!(config.seed_data);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/clients"),
            ("BIND_ADDR", "0.0.0.0:3000"),
            ("PAGE_SIZE", "25"),
            ("SEED_DATA", "false"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.page_size, 25);
        assert!(!config.seed_data);
    }

    #[test]
    fn missing_database_url_is_an_error() {
        assert!(Config::from_vars(vars(&[("PAGE_SIZE", "5")])).is_err());
    }
}
