use crate::ConfigError;
use postdraft_sdk::{ProviderCredentials, ProviderId};
use std::{env, time::Duration};

pub const DEFAULT_TRENDS_FEED_URL: &str = "https://news.google.com/rss/search?q=cloud+automotive+workshop+SaaS+software&hl=en-US&gl=US&ceid=US:en";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_APP_URL: &str = "http://localhost:3000";

/// Process-wide settings, read once at startup and handed to constructors.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: ProviderCredentials,
    /// Providers in order of preference. Only configured ones are used.
    pub provider_priority: Vec<ProviderId>,
    pub trends_feed_url: String,
    /// Upper bound for every outbound call (feed and provider).
    pub http_timeout: Duration,
    pub port: u16,
    /// Origin allowed by CORS.
    pub app_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: ProviderCredentials::default(),
            provider_priority: ProviderId::DEFAULT_PRIORITY.to_vec(),
            trends_feed_url: DEFAULT_TRENDS_FEED_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            port: DEFAULT_PORT,
            app_url: DEFAULT_APP_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, so tests never have to
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let credentials = ProviderCredentials {
            groq_api_key: lookup(ProviderId::Groq.env_var()),
            huggingface_api_key: lookup(ProviderId::HuggingFace.env_var()),
        };

        let provider_priority = match lookup("POSTDRAFT_PROVIDER_PRIORITY") {
            Some(value) => parse_priority(&value)?,
            None => defaults.provider_priority,
        };

        let http_timeout = match lookup("POSTDRAFT_HTTP_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value.trim().parse::<u64>().map_err(|error| {
                    ConfigError::InvalidValue {
                        key: "POSTDRAFT_HTTP_TIMEOUT_SECS",
                        message: error.to_string(),
                    }
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "POSTDRAFT_HTTP_TIMEOUT_SECS",
                        message: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|error| ConfigError::InvalidValue {
                    key: "PORT",
                    message: error.to_string(),
                })?,
            None => defaults.port,
        };

        Ok(Self {
            credentials,
            provider_priority,
            trends_feed_url: lookup("POSTDRAFT_TRENDS_URL").unwrap_or(defaults.trends_feed_url),
            http_timeout,
            port,
            app_url: lookup("APP_URL").unwrap_or(defaults.app_url),
        })
    }

    /// The shared client for outbound calls, bounded by `http_timeout`.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        Ok(reqwest::Client::builder()
            .timeout(self.http_timeout)
            .build()?)
    }
}

fn parse_priority(value: &str) -> Result<Vec<ProviderId>, ConfigError> {
    let priority = value
        .split(',')
        .filter(|item| !item.trim().is_empty())
        .map(str::parse::<ProviderId>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|message| ConfigError::InvalidValue {
            key: "POSTDRAFT_PROVIDER_PRIORITY",
            message,
        })?;

    if priority.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "POSTDRAFT_PROVIDER_PRIORITY",
            message: "at least one provider is required".to_string(),
        });
    }
    Ok(priority)
}
