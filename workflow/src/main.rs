//! Command-line front end for the workflow engine
//!
//! Wires the HTTP prediction service into a `WorkflowStore` and drives it
//! from the terminal.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::signal;
use tokio::sync::mpsc;

use shared::{component_error, component_info, logging, Component};
use workflow::{
    AssetReconciler, HttpPredictionService, PredictionService, ServiceConfig, UploadedInput, WorkflowPhase,
    WorkflowSnapshot, WorkflowStore,
};

/// Upload sensor data, train a failure model and assess fleet risk
#[derive(Parser)]
#[command(name = "workflow")]
#[command(about = "Drives the predictive-maintenance training and assessment workflow")]
pub struct Args {
    /// Base URL of the prediction service (overrides WORKFLOW_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds (overrides WORKFLOW_REQUEST_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Stage a CSV file, train on it and assess every asset
    Run {
        /// Sensor data file
        #[arg(long)]
        file: PathBuf,

        /// Keep refreshing the asset listing until Ctrl+C
        #[arg(long)]
        watch: bool,
    },
    /// Print the server's asset listing
    Assets,
    /// Print prediction history for one asset
    Detail { asset_id: String },
    /// Populate the server with demo predictions
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_tracing(Some(&args.log_level));

    let mut config = ServiceConfig::from_env().context("loading service configuration")?;
    if let Some(api_url) = &args.api_url {
        config = config.with_api_url(api_url).context("--api-url")?;
    }
    if let Some(secs) = args.timeout_secs {
        anyhow::ensure!(secs > 0, "--timeout-secs must be positive");
        config = config.with_request_timeout(Duration::from_secs(secs));
    }

    component_info!(Component::Cli, "🌐 Prediction service at {}", config.api_base_url);
    let service = HttpPredictionService::new(&config)?;

    match args.command {
        Command::Run { file, watch } => run_workflow(service, &config, file, watch).await,
        Command::Assets => print_listing(&service).await,
        Command::Detail { asset_id } => print_detail(&service, &asset_id).await,
        Command::Seed => {
            let response = service.seed_demo_data().await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("{} ({} predictions added)", response.message, response.predictions_added);
            Ok(())
        }
    }
}

async fn run_workflow(
    service: HttpPredictionService,
    config: &ServiceConfig,
    file: PathBuf,
    watch: bool,
) -> anyhow::Result<()> {
    let input = UploadedInput::from_path(&file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;

    let store = Arc::new(WorkflowStore::new(service));
    store.stage_input(input).await;

    for target in [
        WorkflowPhase::DataStaged,
        WorkflowPhase::ModelTrained,
        WorkflowPhase::AssessmentComplete,
    ] {
        if let Err(e) = store.advance(target).await {
            component_error!(Component::Cli, error = %e, "❌ Workflow stopped before {}", target);
            anyhow::bail!(e.user_message());
        }
    }

    let snapshot = store.snapshot().await;
    print_snapshot(&snapshot);

    if !watch {
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    let refresher = {
        let store = Arc::clone(&store);
        let period = config.refresh_interval;
        tokio::spawn(async move { store.run_refresh_loop(period, shutdown_rx).await })
    };

    let mut updates = store.subscribe();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                print_snapshot(&snapshot);
            }
            _ = signal::ctrl_c() => {
                logging::log_shutdown(Component::Cli, "received Ctrl+C");
                break;
            }
        }
    }

    let _ = shutdown_tx.send(()).await;
    refresher.await.context("refresh loop panicked")?;
    Ok(())
}

async fn print_listing(service: &HttpPredictionService) -> anyhow::Result<()> {
    let listing = service.list_assets().await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let assets = AssetReconciler::merge(Vec::new(), listing);
    print_snapshot(&WorkflowSnapshot {
        assets,
        ..WorkflowSnapshot::default()
    });
    Ok(())
}

async fn print_detail(service: &HttpPredictionService, asset_id: &str) -> anyhow::Result<()> {
    let detail = service
        .asset_detail(asset_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!("{} ({})", AssetReconciler::display_name(&detail.asset_id), detail.asset_id);
    match &detail.latest {
        Some(latest) => println!(
            "  latest: {} at {} ({:.0}% failure probability, model {})",
            latest.risk_level.label(),
            latest.timestamp,
            latest.failure_probability * 100.0,
            latest.model_id
        ),
        None => println!("  latest: no prediction yet"),
    }
    if let Some(metrics) = &detail.metrics {
        println!(
            "  sensors: temperature {:.1}, vibration {:.2}, pressure {:.1}, current {:.1}",
            metrics.temperature, metrics.vibration, metrics.pressure, metrics.current
        );
    }
    if !detail.history.is_empty() {
        println!("  history:");
        for point in &detail.history {
            println!(
                "    {:<26} {:<9} {:>5.1}%  {}",
                point.timestamp,
                point.risk_level,
                point.failure_probability * 100.0,
                point.model_id
            );
        }
    }
    Ok(())
}

fn print_snapshot(snapshot: &WorkflowSnapshot) {
    if let Some(training) = &snapshot.training {
        println!(
            "Model {}: {} rows, {} assets, {:.1}% positive",
            training.model_id,
            training.rows_used,
            training.assets_detected,
            training.positive_rate * 100.0
        );
    }

    let summary = snapshot.fleet_summary();
    println!(
        "{} Critical Risks Found ({} assets: {} warning, {} normal)",
        summary.critical, summary.total, summary.warning, summary.normal
    );

    println!(
        "{:<14} {:<16} {:<10} {:>8} {:>10} {:>10}  {}",
        "ASSET", "NAME", "RISK", "TEMP", "VIBRATION", "EFFICIENCY", "ACTION"
    );
    for asset in &snapshot.assets {
        println!(
            "{:<14} {:<16} {:<10} {:>8.1} {:>10.2} {:>9.0}%  {}",
            asset.asset_id,
            asset.display_name,
            asset.risk_level.label(),
            asset.temperature,
            asset.vibration,
            asset.derived_efficiency,
            asset.recommended_action
        );
    }
}
