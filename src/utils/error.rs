use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unauthorized request to {path}")]
    Unauthorized { path: String, body: String },

    #[error("Request to {path} failed with status {status}")]
    StatusError {
        status: StatusCode,
        path: String,
        body: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unexpected response: {message}")]
    ResponseError { message: String },

    #[error("Token storage error: {message}")]
    StorageError { message: String },

    #[error("Navigation failed: {0}")]
    NavigationError(#[from] NavigationError),
}

/// Failures raised by a router while resolving a transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No route matches {0}")]
    NotFound(String),

    #[error("Avoided redundant navigation to current location: {0}")]
    Duplicated(String),

    #[error("Too many redirects while navigating to {0}")]
    RedirectLoop(String),

    #[error("Location assignment rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClientError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ClientError::StatusError { status, .. } => Some(*status),
            ClientError::HttpError(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClientError::NavigationError(NavigationError::Duplicated(_)) => ErrorSeverity::Low,
            ClientError::NavigationError(_) => ErrorSeverity::High,
            ClientError::HttpError(_) => ErrorSeverity::Medium,
            ClientError::StatusError { status, .. } if status.is_server_error() => {
                ErrorSeverity::Medium
            }
            ClientError::Unauthorized { .. }
            | ClientError::StatusError { .. }
            | ClientError::ResponseError { .. }
            | ClientError::SerializationError(_) => ErrorSeverity::High,
            ClientError::IoError(_)
            | ClientError::ConfigError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::StorageError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::Unauthorized { .. } => {
                "Not logged in or the session has expired, please log in again".to_string()
            }
            ClientError::StatusError { status, body, .. } => match server_message(body) {
                Some(message) => format!("Server returned {}: {}", status, message),
                None => format!("Server returned {}", status),
            },
            ClientError::HttpError(e) if e.is_timeout() => "The request timed out".to_string(),
            ClientError::HttpError(_) => "Could not reach the server".to_string(),
            other => other.to_string(),
        }
    }
}

/// Pulls the `error` field out of a JSON error body, the shape the backend uses.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}

pub type Result<T> = std::result::Result<T, ClientError>;
