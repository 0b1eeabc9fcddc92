use shared::ExpenseAppConfig;
use thiserror::Error;

/// Connection settings for the hosted store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Project URL, e.g. https://abc.supabase.co (no trailing slash)
    pub base_url: String,
    /// Public anon key sent as both `apikey` and bearer token
    pub anon_key: String,
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreConfigError {
    #[error("EXPENSE_STORE_URL is not set")]
    MissingUrl,
    #[error("EXPENSE_STORE_ANON_KEY is not set")]
    MissingKey,
    #[error("store URL must start with http:// or https://, got {0}")]
    InvalidUrl(String),
}

impl StoreConfig {
    /// Build from raw values, as read from the environment at build time
    pub fn from_parts(
        base_url: Option<&str>,
        anon_key: Option<&str>,
        table: &str,
    ) -> Result<Self, StoreConfigError> {
        let base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(StoreConfigError::MissingUrl)?;
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(StoreConfigError::InvalidUrl(base_url.to_string()));
        }
        let anon_key = anon_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(StoreConfigError::MissingKey)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            table: table.to_string(),
        })
    }

    /// Endpoint for the expense table
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

/// Everything the page needs at start-up
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub app: ExpenseAppConfig,
    /// Why the remote store is unavailable, if it is
    pub store: Result<StoreConfig, StoreConfigError>,
}

impl AppConfig {
    /// Read `EXPENSE_STORE_URL` / `EXPENSE_STORE_ANON_KEY` captured at compile
    /// time; wasm has no process environment at runtime.
    pub fn from_build_env() -> Self {
        let app = ExpenseAppConfig {
            enable_debug_logging: option_env!("EXPENSE_DEBUG_LOGGING").is_some(),
            ..ExpenseAppConfig::default()
        };
        let store = StoreConfig::from_parts(
            option_env!("EXPENSE_STORE_URL"),
            option_env!("EXPENSE_STORE_ANON_KEY"),
            &app.table,
        );
        Self { app, store }
    }
}
