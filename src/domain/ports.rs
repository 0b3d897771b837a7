use crate::domain::model::Location;
use crate::utils::error::{NavigationError, Result};

/// Persistent string key-value store holding the credential token.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Programmatic navigation, usually backed by the application's router.
pub trait Navigator: Send + Sync {
    fn push(&self, target: &str) -> std::result::Result<(), NavigationError>;
}

/// The address bar: where the user currently is, and a hard location change.
pub trait LocationProvider: Send + Sync {
    fn current(&self) -> Location;

    /// Replaces the whole location, bypassing any router.
    fn assign(&self, href: &str) -> std::result::Result<(), NavigationError>;
}
