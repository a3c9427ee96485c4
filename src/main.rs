use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use figbiz::config::Config;
use figbiz::models::analysis::AnalysisRequest;
use figbiz::models::reference::ReferenceTables;
use figbiz::services::{analysis_service, export};
use figbiz::shared_state::AppState;

#[derive(Parser, Debug)]
#[command(name = "figbiz")]
#[command(about = "Fig greenhouse heating cost and profit estimator", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API (default)
    Serve {
        /// JSON configuration file
        #[arg(long, default_value = "config.json")]
        config: PathBuf,
    },
    /// Run one analysis and write daily.csv / summary.csv
    Run {
        /// JSON analysis request
        #[arg(long)]
        request: PathBuf,

        /// Weather table (date,tmin,tmax); replaces any observations in the request
        #[arg(long)]
        weather: Option<PathBuf>,

        /// Output directory for the CSV exports
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "figbiz=info,tower_http=debug,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    match args.command.unwrap_or(Command::Serve { config: PathBuf::from("config.json") }) {
        Command::Serve { config } => serve(&config).await,
        Command::Run { request, weather, out } => run_once(&request, weather.as_deref(), &out),
    }
}

async fn serve(config_path: &Path) -> Result<()> {
    // 1. Load configuration
    let config = if config_path.exists() {
        Config::load(config_path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to load {}", config_path.display()))?
    } else {
        tracing::warn!("{} not found, using defaults", config_path.display());
        Config::default()
    }
    .with_env_overrides();

    // 2. Initialize shared read-only state
    let state = AppState::new(&config);
    tracing::info!(
        "Configuration loaded: {} regions, {} insulation grades, auth {}",
        state.tables.regions.len(),
        state.tables.insulation_grades.len(),
        if state.auth_enabled() { "enabled" } else { "disabled" }
    );

    // 3. Start Axum HTTP server
    let app = figbiz::create_router(&config, state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("API Server listening on http://{}", addr);
    tracing::info!("Scalar UI: http://{}/scalar", addr);

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .context("HTTP server failed")?;
    Ok(())
}

fn run_once(request_path: &Path, weather: Option<&Path>, out: &Path) -> Result<()> {
    let text = std::fs::read_to_string(request_path)
        .with_context(|| format!("Failed to read {}", request_path.display()))?;
    let mut request: AnalysisRequest = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", request_path.display()))?;

    if let Some(path) = weather {
        let csv = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read weather table {}", path.display()))?;
        request.observations = None;
        request.weather_csv = Some(csv);
    }

    let tables = ReferenceTables::builtin();
    let report = analysis_service::run(&request, &tables).context("Analysis failed")?;
    let (daily, summary) = export::write_report(out, &report)?;

    let s = &report.summary;
    println!("Surface area      : {:.1} m² (side arc {:.2} m)", report.geometry.total_area, report.geometry.side_arc_length);
    println!("Heating (avg)     : {:.1} h/day over {} days", s.average_heating_hours, s.winter_days);
    println!("Winter revenue    : {:.0}", s.winter_revenue);
    println!("Winter fuel cost  : {:.0}", s.winter_fuel_cost);
    println!("Depreciation      : {:.0}", s.depreciation);
    println!("Winter net profit : {:.0}", s.winter_net_profit);
    println!("Annual net profit : {:.0}", s.annual_net_profit);
    println!("Exports           : {}, {}", daily.display(), summary.display());
    Ok(())
}
