//! Main entry point for the LocalPro Canvas CLI.

use std::{path::PathBuf, process::ExitCode};

use canvas_cli::errors::CanvasError;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use url::Url;

mod commands;

use commands::{
    App,
    auth::{LoginArgs, RegisterArgs},
    config::ConfigArgs,
    portfolio::PortfolioCommand,
};

/// LocalPro Canvas CLI
#[derive(Parser, Debug)]
#[command(name = "canvas", version)]
#[command(about = "Build and share portfolios with LocalPro Canvas", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (optional)
    #[arg(
        long,
        short,
        global = true,
        help = "Path to the configuration file (e.g., canvas.yaml or canvas.json). If not provided, defaults will be used."
    )]
    config: Option<PathBuf>,

    /// API base URL, overriding configuration and environment
    #[arg(
        long,
        global = true,
        help = "API base URL (e.g., http://127.0.0.1:8000). Overrides the configuration file and CANVAS_API_BASE_URL."
    )]
    api: Option<Url>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the LocalPro Canvas CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account and sign in
    Register(RegisterArgs),
    /// Sign in and store the session
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Create or show portfolios
    #[command(subcommand)]
    Portfolio(PortfolioCommand),
    /// Generate a configuration file
    Config(ConfigArgs),
    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell type for which to generate the completion script
        #[arg(
            long,
            short,
            value_enum,
            help = "The shell type for which to generate the completion script (e.g., bash, zsh, fish, powershell)"
        )]
        shell: Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let app = match cli.command {
        Commands::Config(args) => return commands::config::generate_config(&args),
        Commands::Completion { shell } => {
            commands::completion::generate_completion(shell);
            return Ok(());
        }
        _ => App::load(cli.config.as_deref(), cli.api)?,
    };

    match cli.command {
        Commands::Register(args) => commands::auth::register(&app, args).await,
        Commands::Login(args) => commands::auth::login(&app, args).await,
        Commands::Logout => commands::auth::logout(&app),
        Commands::Whoami => commands::auth::whoami(&app),
        Commands::Portfolio(command) => commands::portfolio::run(&app, command).await,
        Commands::Config(_) | Commands::Completion { .. } => Ok(()),
    }
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<CanvasError>() {
        Some(CanvasError::Validation(errors)) => {
            for (field, error) in errors.iter() {
                eprintln!("  {}: {}", field.as_str(), error.message(field));
            }
        }
        Some(CanvasError::NotFound { identifier }) => {
            eprintln!("Portfolio Not Found");
            eprintln!("No portfolio matches '{identifier}'.");
        }
        _ => eprintln!("error: {err:#}"),
    }
}
