use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct PortalConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

pub fn load_portal_config() -> anyhow::Result<PortalConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/portal"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
