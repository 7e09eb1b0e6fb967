/// Configuration management. Loaded once from the environment at startup;
/// the signing secret and algorithm are never rotated at runtime.
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_server_host")]
    pub server_host: String,
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    #[serde(default = "default_jwt_algorithm")]
    pub jwt_algorithm: String,
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,
    #[serde(default = "default_verification_code_expire_minutes")]
    pub verification_code_expire_minutes: i64,
    #[serde(default = "default_reaper_grace_seconds")]
    pub reaper_grace_seconds: i64,
    #[serde(default = "default_reaper_interval_seconds")]
    pub reaper_interval_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_expire_minutes() -> i64 {
    30
}

fn default_verification_code_expire_minutes() -> i64 {
    10
}

fn default_reaper_grace_seconds() -> i64 {
    30
}

fn default_reaper_interval_seconds() -> u64 {
    30
}
