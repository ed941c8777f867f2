use crate::error::AppError;
use dotenv::dotenv;
use once_cell::sync::OnceCell;
use std::env;
use std::fmt;
use tracing::{info, warn};

pub const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:8000";

pub const FORM_RECOGNIZER_KEY_VAR: &str = "AZURE_FORM_RECOGNIZER_KEY";
pub const FORM_RECOGNIZER_ENDPOINT_VAR: &str = "AZURE_FORM_RECOGNIZER_ENDPOINT";

/// Host-level settings shared with every forwarder through the request context.
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub host: String,
    /// Key callers must present to the simulator.
    pub simulator_api_key: String,
    /// Scheme and authority that rewritten polling URLs point at.
    pub local_base_url: String,
    pub debug_mode: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|_| AppError::Config("PORT must be a number".to_string()))?;

        let simulator_api_key = env::var("SIMULATOR_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::Config("SIMULATOR_API_KEY must be set".to_string()))?;

        Ok(Self {
            port,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            simulator_api_key,
            local_base_url: env::var("LOCAL_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LOCAL_BASE_URL.to_string()),
            debug_mode: env::var("SIMULATOR_DEBUG")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    pub fn with_api_key(simulator_api_key: impl Into<String>) -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            simulator_api_key: simulator_api_key.into(),
            local_base_url: DEFAULT_LOCAL_BASE_URL.to_string(),
            debug_mode: false,
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("host", &self.host)
            .field("simulator_api_key", &mask_api_key(&self.simulator_api_key))
            .field("local_base_url", &self.local_base_url)
            .field("debug_mode", &self.debug_mode)
            .finish()
    }
}

/// Credentials for the real Document Intelligence resource.
#[derive(Clone, PartialEq, Eq)]
pub struct DocIntelligenceCredentials {
    pub api_key: String,
    pub endpoint: String,
}

impl DocIntelligenceCredentials {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Both values must be present and non-empty.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(FORM_RECOGNIZER_KEY_VAR).filter(|v| !v.is_empty())?;
        let endpoint = lookup(FORM_RECOGNIZER_ENDPOINT_VAR).filter(|v| !v.is_empty())?;
        Some(Self { api_key, endpoint })
    }
}

impl fmt::Debug for DocIntelligenceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocIntelligenceCredentials")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// First four and last four characters of a key, joined by `...`.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let head: String = chars.iter().take(4).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}

type CredentialLoader = Box<dyn Fn() -> Option<DocIntelligenceCredentials> + Send + Sync>;

/// Upstream credentials, loaded on first use and never reloaded.
///
/// A cache that loaded nothing stays empty for its whole lifetime, so the
/// forwarder keeps declining requests without re-reading the environment.
pub struct CredentialCache {
    cell: OnceCell<Option<DocIntelligenceCredentials>>,
    loader: CredentialLoader,
}

impl CredentialCache {
    pub fn from_env() -> Self {
        Self::with_loader(DocIntelligenceCredentials::from_env)
    }

    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn() -> Option<DocIntelligenceCredentials> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            loader: Box::new(loader),
        }
    }

    /// Already initialized; the loader never runs.
    pub fn preloaded(credentials: Option<DocIntelligenceCredentials>) -> Self {
        Self {
            cell: OnceCell::with_value(credentials),
            loader: Box::new(|| None),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn get(&self) -> Option<&DocIntelligenceCredentials> {
        self.cell
            .get_or_init(|| {
                let loaded = (self.loader)();
                match &loaded {
                    Some(credentials) => {
                        info!("Initialized Azure Document Intelligence forwarder");
                        info!(endpoint = %credentials.endpoint, "API endpoint");
                        info!(api_key = %mask_api_key(&credentials.api_key), "API key");
                    }
                    None => {
                        warn!(
                            "Got a request that looked like a Document Intelligence request, \
                             but missing some or all of the required environment variables \
                             for forwarding: {}, {}",
                            FORM_RECOGNIZER_ENDPOINT_VAR, FORM_RECOGNIZER_KEY_VAR
                        );
                    }
                }
                loaded
            })
            .as_ref()
    }
}
