use crate::config::ClientConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "devkit")]
#[command(about = "Client for the developer tools API: routes, login and authenticated requests")]
pub struct CliArgs {
    /// TOML file with client settings
    #[arg(long, env = "DEVKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the API origin, e.g. http://localhost:5000
    #[arg(long, env = "DEVKIT_BASE_URL")]
    pub base_url: Option<String>,

    /// Override where the credential token is persisted
    #[arg(long)]
    pub store: Option<PathBuf>,

    #[arg(long, short, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the route table
    Routes,
    /// Run a navigation through the auth guard
    Navigate {
        target: String,
        /// Location to start from
        #[arg(long, default_value = "/")]
        from: String,
    },
    /// Log in and persist the session token
    Login {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, env = "DEVKIT_PASSWORD")]
        password: String,
        /// Login page location, used to pick the post-login destination
        #[arg(long, default_value = "/login")]
        at: String,
    },
    /// Create an account and persist the session token
    Register {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, env = "DEVKIT_PASSWORD")]
        password: String,
    },
    /// Drop the persisted token
    Logout,
    /// Show the account behind the persisted token
    Whoami,
    /// Report whether a token is stored
    Token,
    /// Send a request to the API and print the response body
    Request {
        #[arg(value_parser = ["GET", "POST", "PUT", "DELETE"], ignore_case = true)]
        method: String,
        /// Path relative to the API base path, e.g. /timestamp/current
        path: String,
        /// JSON request body
        #[arg(long)]
        data: Option<String>,
        /// Location the request is made from
        #[arg(long, default_value = "/")]
        from: String,
    },
}

impl CliArgs {
    /// File config (if any) with command-line overrides applied.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(store) = &self.store {
            config.storage_path = store.clone();
        }

        Ok(config)
    }
}
