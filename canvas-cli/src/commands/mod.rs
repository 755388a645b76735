pub mod auth;
pub mod completion;
pub mod config;
pub mod portfolio;

use std::{
    io::{self, Write},
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result};
use canvas_cli::{
    api::CanvasClient,
    session::{FileCredentialStore, Session},
    telemetry::initialize_tracing,
};
use shared::config::Config;
use url::Url;

/// Everything a networked command needs, built once per invocation.
#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub session: Session,
    pub client: CanvasClient,
}

impl App {
    pub fn load(config_path: Option<&Path>, api_override: Option<Url>) -> Result<Self> {
        let config = Config::load_config(config_path, api_override)
            .context("failed to load configuration")?;
        initialize_tracing(&config);

        let session_path = config.resolved_session_path()?;
        let session = Session::load(Arc::new(FileCredentialStore::new(&session_path)))
            .with_context(|| format!("failed to load session from {}", session_path.display()))?;
        let client = CanvasClient::from_config(&config, session.clone())
            .context("failed to build HTTP client")?;

        Ok(Self {
            config,
            session,
            client,
        })
    }
}

/// Read a non-empty line from stdin after printing `message`.
pub fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
