use clap::Parser;
use devkit_client::config::cli::Command;
use devkit_client::utils::error::ErrorSeverity;
use devkit_client::utils::{logger, validation::Validate};
use devkit_client::{
    ApiClient, AuthGuard, CliArgs, ClientConfig, FileTokenStore, Location, NavigationError,
    Result, RouteTable, Router, TokenStore,
};
use reqwest::Method;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::debug!("Starting devkit");

    if let Err(e) = run(args).await {
        tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

/// Wires store, guard, router and client the way the app does at startup.
struct App {
    config: ClientConfig,
    store: Arc<FileTokenStore>,
    router: Arc<Router>,
    client: ApiClient,
}

impl App {
    fn new(config: ClientConfig) -> Result<Self> {
        let store = Arc::new(FileTokenStore::new(&config.storage_path));
        let guard = AuthGuard::new(store.clone(), &config);
        let router = Arc::new(Router::new(RouteTable::standard(&config.login_route), guard));
        let client = ApiClient::builder(&config, store.clone())
            .navigator(router.clone())
            .location(router.clone())
            .build()?;

        Ok(Self {
            config,
            store,
            router,
            client,
        })
    }

    /// Moves the router to `from` before a command runs; staying on `/` is not a navigation.
    fn start_at(&self, from: &str) -> Result<()> {
        match self.router.navigate(from) {
            Ok(report) if report.redirected => {
                println!("↪ {} redirected to {}", report.requested, report.landed);
                Ok(())
            }
            Ok(_) | Err(NavigationError::Duplicated(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let config = args.client_config()?;
    config.validate()?;
    let app = App::new(config)?;

    match args.command {
        Command::Routes => {
            for route in app.router.table().iter() {
                let lock = if route.requires_auth { "🔒" } else { "  " };
                println!("{} {:<20} {:<18} {}", lock, route.path, route.name, route.view);
            }
        }
        Command::Navigate { target, from } => {
            app.start_at(&from)?;
            match app.router.navigate(&target) {
                Ok(report) if report.redirected => {
                    println!("↪ {} redirected to {}", report.requested, report.landed);
                }
                Ok(report) => println!("✅ {} ({})", report.landed, report.view),
                Err(NavigationError::Duplicated(at)) => println!("Already at {}", at),
                Err(e) => return Err(e.into()),
            }
        }
        Command::Login {
            username,
            password,
            at,
        } => {
            let session = app.client.login(&username, &password).await?;
            println!("✅ Logged in as {}", session.user.username);
            let next = app.client.redirect_after_login(&Location::parse(&at));
            println!("➡ Continue at {}", next);
        }
        Command::Register { username, password } => {
            let session = app.client.register(&username, &password).await?;
            println!("✅ Registered {}", session.user.username);
        }
        Command::Logout => {
            app.client.logout()?;
            println!("Logged out");
        }
        Command::Whoami => {
            let user = app.client.me().await?;
            let role = if user.is_admin { " (admin)" } else { "" };
            println!("{} #{}{}", user.username, user.id, role);
        }
        Command::Token => {
            if app.client.is_authenticated() {
                println!(
                    "Token stored under '{}' in {}",
                    app.config.token_key,
                    app.store.path().display()
                );
            } else {
                println!("No token stored");
            }
        }
        Command::Request {
            method,
            path,
            data,
            from,
        } => {
            app.start_at(&from)?;
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .map_err(|e| devkit_client::ClientError::ConfigError {
                    message: format!("Invalid method: {}", e),
                })?;
            let body = data
                .as_deref()
                .map(serde_json::from_str::<serde_json::Value>)
                .transpose()?;

            match app.client.request(method, &path, body.as_ref()).await {
                Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                Err(e) => {
                    if e.is_unauthorized() && app.store.get(&app.config.token_key)?.is_none() {
                        println!("↪ Session cleared, now at {}", app.router.current());
                    }
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
