//! CLI definition and server configuration.
//!
//! Everything is settable by flag or environment variable; secrets are
//! accepted only by environment in practice and never echoed back.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Vehicle-diagnostics logging backend: admin REST API plus intake bot webhook.
#[derive(Debug, Parser)]
#[command(name = "pitstop", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the REST API and bot webhook server.
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Directory holding the SQLite database (default: ~/.pitstop).
    #[arg(long, env = "PITSTOP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Max bot token for outbound messages.
    #[arg(long, env = "PITSTOP_BOT_TOKEN", hide_env_values = true)]
    pub bot_token: Option<String>,

    /// Override the Max platform API base URL.
    #[arg(long, env = "PITSTOP_BOT_API_URL")]
    pub bot_api_url: Option<String>,

    /// Admin panel login.
    #[arg(long, env = "PITSTOP_ADMIN_USERNAME")]
    pub admin_username: Option<String>,

    /// Admin panel password.
    #[arg(long, env = "PITSTOP_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Retention for parked conversation sessions, in seconds.
    #[arg(long, env = "PITSTOP_SESSION_TTL_SECS", default_value_t = 1800)]
    pub session_ttl_secs: u64,

    /// Enable OpenTelemetry stdout trace export.
    #[arg(long)]
    pub otel: bool,
}
