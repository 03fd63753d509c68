use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Apper,
    Memory,
}

#[derive(Debug, Clone)]
pub struct ApperCredentials {
    pub base_url: Url,
    pub project_id: String,
    pub public_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub record_store: StoreKind,
    pub apper: Option<ApperCredentials>,
    pub backend_timeout_secs: u64,
    pub notification_capacity: usize,
    pub log_json: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let record_store = match env::var("RECORD_STORE").ok().as_deref() {
            None | Some("") | Some("apper") => StoreKind::Apper,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                return Err(Error::Config(format!(
                    "Invalid value for RECORD_STORE: {}",
                    other
                )))
            }
        };

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            record_store,
            apper: apper_credentials()?,
            backend_timeout_secs: get_env_parse_or("BACKEND_TIMEOUT_SECS", 60)?,
            notification_capacity: get_env_parse_or("NOTIFICATION_CAPACITY", 100)?,
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }
}

/// The hosted backend is optional: without all three variables the services
/// run with no client and degrade to their empty results.
fn apper_credentials() -> Result<Option<ApperCredentials>> {
    let base_url = optional_env("APPER_BASE_URL");
    let project_id = optional_env("APPER_PROJECT_ID");
    let public_key = optional_env("APPER_PUBLIC_KEY");

    let (Some(base_url), Some(project_id), Some(public_key)) = (base_url, project_id, public_key)
    else {
        return Ok(None);
    };

    let base_url = Url::parse(&base_url)
        .map_err(|e| Error::Config(format!("Invalid value for APPER_BASE_URL: {}", e)))?;

    Ok(Some(ApperCredentials {
        base_url,
        project_id,
        public_key,
    }))
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
