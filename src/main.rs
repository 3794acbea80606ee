use anyhow::Result;
use clap::{Parser, Subcommand};

/// folio - personal portfolio site
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Single-page portfolio with a contact form", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate configuration and portfolio content
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = folio::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize observability (tracing + logging)
    folio::observability::init_observability(
        "folio",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let result = match cli.command {
        Commands::Serve { host, port } => folio::cli::serve(config, host, port).await,
        Commands::Check => folio::cli::check(&config),
    };

    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }

    folio::observability::shutdown_observability();

    result
}
