use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_env()
});

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub health_timeout: Duration,
    pub search_timeout: Duration,
    pub sync_timeout: Duration,
    pub sync_content_type: String,
    pub cms: CmsConfig,
}

/// Credentials and location of the CMS delivery API.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    pub api_key: Option<String>,
    pub delivery_token: Option<String>,
    pub environment: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Config {
        let region = get_env_or_default("CONTENTSTACK_REGION", "eu");
        Config {
            api_base_url: get_env_or_default("SEARCH_API_BASE_URL", "http://localhost:5000"),
            health_timeout: Duration::from_secs(get_env_parsed("SEARCH_HEALTH_TIMEOUT_SECS", 10)),
            search_timeout: Duration::from_secs(get_env_parsed("SEARCH_TIMEOUT_SECS", 90)),
            sync_timeout: Duration::from_secs(get_env_parsed("SEARCH_SYNC_TIMEOUT_SECS", 90)),
            sync_content_type: get_env_or_default("SEARCH_SYNC_CONTENT_TYPE", "product"),
            cms: CmsConfig {
                api_key: get_env_opt("CONTENTSTACK_STACK_API_KEY"),
                delivery_token: get_env_opt("CONTENTSTACK_DELIVERY_TOKEN"),
                environment: get_env_or_default("CONTENTSTACK_ENVIRONMENT", "development"),
                base_url: get_env_or_default(
                    "CONTENTSTACK_API_BASE_URL",
                    &format!("https://{region}-cdn.contentstack.com/v3"),
                ),
            },
        }
    }

    /// Same defaults as the environment, pointed at `base_url`. Handy for tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Config {
        Config {
            api_base_url: base_url.into(),
            health_timeout: Duration::from_secs(10),
            search_timeout: Duration::from_secs(90),
            sync_timeout: Duration::from_secs(90),
            sync_content_type: "product".to_string(),
            cms: CmsConfig {
                api_key: None,
                delivery_token: None,
                environment: "development".to_string(),
                base_url: "https://eu-cdn.contentstack.com/v3".to_string(),
            },
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key)
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|_| default.to_string())
}

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn get_env_parsed<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring malformed {key}={raw:?}, using {default}");
            default
        }),
        Err(_) => default,
    }
}
