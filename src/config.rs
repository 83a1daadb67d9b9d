use std::{env, str::FromStr, time::Duration};

use derive_getters::Getters;
use log::warn;

pub const DEFAULT_API_KEY: &str = "demo";
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_millis(200);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime settings for the quote layer.
#[derive(Clone, Debug, Getters)]
pub struct Config {
    api_key: String,
    base_url: String,
    cache_ttl: Duration,
    pacing_delay: Duration,
    request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            pacing_delay: DEFAULT_PACING_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Config {
    /// Reads the environment (and a `.env` file, if any), falling back to defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            api_key: env::var("ALPHA_VANTAGE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_KEY.to_string()),
            base_url: env::var("ALPHA_VANTAGE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            cache_ttl: Duration::from_secs(parse_var(
                "QUOTE_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL.as_secs(),
            )),
            pacing_delay: Duration::from_millis(parse_var(
                "QUOTE_PACING_MS",
                DEFAULT_PACING_DELAY.as_millis() as u64,
            )),
            request_timeout: Duration::from_secs(parse_var(
                "QUOTE_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT.as_secs(),
            )),
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub fn with_pacing_delay(mut self, pacing_delay: Duration) -> Self {
        self.pacing_delay = pacing_delay;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

fn parse_var<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            warn!("Ignoring unparseable {}='{}', using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}
