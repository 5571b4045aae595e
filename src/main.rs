mod api;
mod config;
mod dashboard;
mod dom;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::api::HttpBackend;
use crate::config::DashboardConfig;
use crate::dashboard::{DashboardController, HealthPoller};
use crate::dom::{ids, Document};

#[derive(Parser)]
#[command(name = "trading-dashboard")]
#[command(author = "Trading Bot")]
#[command(version = "0.1.0")]
#[command(about = "Dashboard client for the trading bot REST API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "dashboard.toml")]
    config: PathBuf,

    /// Backend base URL (overrides the configuration file)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dashboard and keep polling system status until Ctrl+C
    Watch,
    /// Check application and exchange connection status
    Health,
    /// Show the number of active strategies
    Strategies,
    /// Fetch account information
    Account,
    /// Show technical analysis for a symbol
    Analysis {
        /// Symbol to analyze (defaults to the configured one)
        #[arg(short, long)]
        symbol: Option<String>,
    },
    /// Show the backend settings
    Settings,
    /// Show the portfolio risk assessment
    Risk,
    /// Start a new strategy
    Start {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        symbol: String,
        /// Strategy type, e.g. grid, mean_reversion, momentum
        #[arg(short = 't', long = "type")]
        strategy_type: String,
        /// Order volume; parsed leniently, unparsable values are sent as null
        #[arg(short, long)]
        volume: String,
    },
    /// Stop a running strategy
    Stop {
        /// Strategy ID as returned by `start`
        strategy_id: String,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = DashboardConfig::load(Some(cli.config.as_path()))?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
        config
            .validate()
            .map_err(|errors| anyhow!("invalid configuration: {}", errors.join(", ")))?;
    }

    let backend = Arc::new(HttpBackend::new(&config.base_url));
    let controller = DashboardController::new(backend, Document::dashboard(config.retention()))
        .with_analysis_symbol(&config.analysis_symbol);

    match cli.command {
        Commands::Watch => {
            run_watch(controller, &config).await?;
        }
        Commands::Health => {
            controller.check_health().await;
            print_regions(&controller, &[ids::APP_STATUS, ids::BYBIT_STATUS]).await;
        }
        Commands::Strategies => {
            controller.get_strategies().await;
            print_regions(&controller, &[ids::STRATEGIES_COUNT]).await;
        }
        Commands::Account => {
            controller.get_account_info().await;
        }
        Commands::Analysis { symbol } => {
            let controller = match symbol {
                Some(symbol) => controller.with_analysis_symbol(&symbol),
                None => controller,
            };
            controller.get_technical_analysis().await;
            print_regions(&controller, &[ids::ANALYSIS_RESULTS]).await;
        }
        Commands::Settings => {
            controller.load_settings().await;
            print_regions(&controller, &[ids::SETTINGS_CONTENT]).await;
        }
        Commands::Risk => {
            controller.get_risk_assessment().await;
            print_regions(&controller, &[ids::RISK_CONTENT]).await;
        }
        Commands::Start { name, symbol, strategy_type, volume } => {
            {
                let doc = controller.document();
                let mut doc = doc.write().await;
                doc.set_value(ids::STRATEGY_NAME, name);
                doc.set_value(ids::STRATEGY_SYMBOL, symbol);
                doc.set_value(ids::STRATEGY_TYPE, strategy_type);
                doc.set_value(ids::STRATEGY_VOLUME, volume);
            }
            controller.submit_strategy().await;
            print_regions(&controller, &[ids::STRATEGIES_COUNT]).await;
        }
        Commands::Stop { strategy_id } => {
            controller.stop_strategy(&strategy_id).await;
            print_regions(&controller, &[ids::STRATEGIES_COUNT]).await;
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

async fn run_watch(controller: DashboardController, config: &DashboardConfig) -> Result<()> {
    info!("Trading dashboard v0.1.0 -> {}", config.base_url);

    controller.load().await;
    let poller = HealthPoller::new(controller.clone(), config.poll_interval()).spawn();

    info!("Polling status every {}s", config.poll_interval_secs);
    info!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;
    info!("Shutting down...");
    poller.abort();

    let doc = controller.snapshot().await;
    println!("\n=== Dashboard ===");
    print!("{}", doc);
    Ok(())
}

async fn print_regions(controller: &DashboardController, region_ids: &[&str]) {
    let doc = controller.snapshot().await;
    for id in region_ids {
        if let Some(line) = doc.describe(id) {
            println!("{}", line);
        }
    }
}
