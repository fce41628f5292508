use std::num::NonZeroU64;

use serde::Deserialize;

pub static DEFAULT_PORT: u16 = 3000;
pub static DEFAULT_MAX_CONNECTIONS: u32 = 50;
pub static DEFAULT_RATE_LIMIT_PER_SECOND: u64 = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    pub database_url: String,
    pub database_max_connections: Option<u32>,

    pub rate_limit_per_second: Option<NonZeroU64>,
    pub seed_on_start: Option<bool>,
}

fn default_app_env() -> String {
    "development".to_string()
}
