#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_BASE_PATH: &str = "/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_REDIRECT_PARAM: &str = "redirect";
pub const DEFAULT_FALLBACK_REDIRECT: &str = "/data-construction";
pub const DEFAULT_STORAGE_PATH: &str = ".devkit/storage.json";

/// Wiring for the API client, the auth guard and the token store.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin the API is served from; `base_path` is appended to it.
    pub base_url: String,
    pub base_path: String,
    pub timeout_ms: u64,
    /// Key the credential token is stored under.
    pub token_key: String,
    pub login_route: String,
    pub redirect_param: String,
    /// Post-login destination when there is no current location to return to.
    pub fallback_redirect: String,
    /// Endpoints whose 401 means "bad credentials", not "session expired".
    pub auth_exempt_paths: Vec<String>,
    pub storage_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            redirect_param: DEFAULT_REDIRECT_PARAM.to_string(),
            fallback_redirect: DEFAULT_FALLBACK_REDIRECT.to_string(),
            auth_exempt_paths: vec!["/auth/login".to_string(), "/auth/register".to_string()],
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

impl ClientConfig {
    /// Loads a config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses a config from TOML text, expanding `${VAR}` references first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// `base_url` joined with `base_path`, without a trailing slash.
    pub fn api_root(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.base_path.trim_matches('/')
        )
        .trim_end_matches('/')
        .to_string()
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }

    pub fn is_auth_exempt(&self, path: &str) -> bool {
        self.auth_exempt_paths.iter().any(|exempt| exempt == path)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_route_path("base_path", &self.base_path)?;
        validation::validate_positive_number("timeout_ms", self.timeout_ms, 1)?;
        validation::validate_non_empty_string("token_key", &self.token_key)?;
        validation::validate_non_empty_string("redirect_param", &self.redirect_param)?;
        validation::validate_route_path("login_route", &self.login_route)?;
        validation::validate_route_path("fallback_redirect", &self.fallback_redirect)?;
        for path in &self.auth_exempt_paths {
            validation::validate_route_path("auth_exempt_paths", path)?;
        }
        validation::validate_path("storage_path", &self.storage_path.to_string_lossy())?;
        Ok(())
    }
}
