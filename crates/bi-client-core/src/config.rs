//! Consumer facing settings for the client core

use bi_shared::{const_config::client::CLIENT_DEFAULT_LIST_CACHE_TTL, time::Seconds};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every request, e.g. `http://localhost:8000/api`. Joined to
    /// the endpoint paths verbatim so it must not end with a slash.
    pub api_base_url: String,
    /// Shown by consumers in titles and about dialogs
    pub app_name: String,
    /// How long list responses are served from the cache before the next call
    /// goes back to the network
    pub list_cache_ttl: Seconds,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            app_name: "BI Dashboard".to_string(),
            list_cache_ttl: CLIENT_DEFAULT_LIST_CACHE_TTL,
        }
    }
}

/// Loads settings from `configuration/client.toml` (optional) overlaid with
/// environment variables, so `BI_API_BASE_URL=... ` overrides the file.
///
/// Note do not try to move configuration folder to root because it will make
/// it tricky for tests as they start at the crate root not the workspace root
pub fn get_configuration() -> Result<ClientConfig, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    let settings = config::Config::builder()
        .add_source(
            config::File::from(configuration_directory.join("client.toml")).required(false),
        )
        .add_source(
            config::Environment::with_prefix("BI")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<ClientConfig>()
}
