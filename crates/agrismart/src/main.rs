mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use agrismart_core::kernel::constants;
use agrismart_core::storage::ConfigFormat;
use agrismart_core::{AppConfig, Application};
use clap::{Parser, Subcommand};
use log::{error, info};

/// AgriSmart AI: Intelligent Farming Assistant
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Print "pong" and exit
    #[arg(long)]
    ping: bool,

    /// Configuration file (.json, .yaml, .yml or .toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset; overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mount the app, wait for startup to settle and print the screen
    Launch {
        /// Route to show instead of the home screen
        #[arg(long)]
        route: Option<String>,
    },
    /// Print the effective configuration
    ShowConfig {
        /// Output format: json, yaml or toml
        #[arg(long, default_value = "toml")]
        format: String,
    },
}

fn load_config(path: Option<&Path>) -> agrismart_core::kernel::error::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path),
        None => AppConfig::load_or_default(Some(Path::new(constants::CONFIG_FILE_NAME))),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(args.log_level.as_deref().unwrap_or(&config.logging.level));

    match args.command {
        Some(Commands::ShowConfig { format }) => show_config(&config, &format),
        Some(Commands::Launch { route }) => launch(config, route).await,
        None => launch(config, None).await,
    }
}

fn show_config(config: &AppConfig, format: &str) -> ExitCode {
    let Some(format) = ConfigFormat::from_name(format) else {
        eprintln!("Unsupported config format '{}'", format);
        return ExitCode::FAILURE;
    };
    match config.serialize(format) {
        Ok(text) => {
            println!("{}", text.trim_end());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize configuration: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn launch(config: AppConfig, route: Option<String>) -> ExitCode {
    println!("{} v{}", constants::APP_NAME, constants::APP_VERSION);
    println!("Initializing application...");

    let mut app = match Application::new(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to initialize application: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = app.mount() {
        eprintln!("Failed to mount application: {}", e);
        return ExitCode::FAILURE;
    }
    if let Some(route) = route {
        app.navigate(route);
    }

    // First paint happens before anything settled.
    if app.render().shows_loading() {
        info!("Showing loading screen while state is restored");
    }

    app.wait_until_hydrated().await;
    let phase = app.wait_until_settled().await;
    let view = app.render();
    print!("{}", view.render_to_string());
    println!("Phase: {}", phase);

    if let Some(report) = app.wait_for_initialization().await {
        for outcome in report.outcomes.iter().filter(|o| !o.is_success()) {
            println!("  Service '{}' unavailable: {}", outcome.service, outcome.error.as_deref().unwrap_or(""));
        }
    }

    println!("Shutting down application...");
    match app.unmount() {
        Ok(teardown) => match teardown.await {
            Ok(report) if !report.failed.is_empty() => {
                error!("{} service(s) failed to clean up", report.failed.len());
            }
            Ok(_) => {}
            Err(e) => error!("Teardown task failed: {}", e),
        },
        Err(e) => error!("Failed to unmount application: {}", e),
    }

    ExitCode::SUCCESS
}
