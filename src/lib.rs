pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliArgs;

pub use crate::adapters::{FileTokenStore, HashLocation, MemoryTokenStore};
pub use crate::config::ClientConfig;
pub use crate::core::{
    client::ApiClient,
    guard::{AuthGuard, GuardDecision},
    router::{NavigationReport, Router},
    routes::{RouteDescriptor, RouteTable, View},
};
pub use crate::domain::model::{Location, Session, User};
pub use crate::domain::ports::{LocationProvider, Navigator, TokenStore};
pub use crate::utils::error::{ClientError, NavigationError, Result};
