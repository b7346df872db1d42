//! HR directory: REST API server
//!
//! ```sh
//! # Run with default config (~/.config/hr-directory/config.toml)
//! JWT_SECRET=... hr-directory
//!
//! # Custom config path and port
//! hr-directory --config /etc/hr-directory/config.toml --port 9000
//!
//! # Validate config without starting
//! hr-directory --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use hr_directory::config::AppConfig;
use hr_directory::server::{init_tracing, ServerHandle, ServerOptions};

/// Employee directory API with role-based access control.
#[derive(Parser, Debug)]
#[command(
    name = "hr-directory",
    version,
    about = "HR employee directory REST API",
    long_about = "Employee directory with JWT authentication and HR/Employee roles.\n\n\
                  Default config: ~/.config/hr-directory/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "HR_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default HR account.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(hr_directory::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            init_tracing(&AppConfig::default());
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    handle.wait().await;

    Ok(())
}
