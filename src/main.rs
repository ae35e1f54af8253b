use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use care_compass::catalog::TrialCatalog;
use care_compass::config::AppConfig;
use care_compass::error::AppError;
use care_compass::matching::{
    match_router, MatchEngine, MatchService, PatientProfile, ScoringWeights,
};
use care_compass::telemetry;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "CareCompass",
    about = "Rank clinical trials against a patient profile from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank the trial catalog against a patient profile JSON file
    Rank(RankArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Path to a structured patient profile (JSON)
    #[arg(long)]
    patient: PathBuf,
    /// Trial catalog CSV (defaults to the configured CSV_PATH)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Print only the top N results
    #[arg(long, default_value_t = 10)]
    top: usize,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Rank(args) => run_rank(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = Arc::new(TrialCatalog::from_csv_path(&config.catalog.csv_path)?);
    info!(trials = catalog.len(), path = %config.catalog.csv_path.display(), "trial catalog loaded");

    let engine = MatchEngine::new(ScoringWeights::default())?;
    let service = Arc::new(MatchService::new(engine, catalog));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(match_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "trial matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let raw = std::fs::read_to_string(&args.patient)?;
    let patient: PatientProfile = serde_json::from_str(&raw)?;

    let csv_path = args.catalog.unwrap_or(config.catalog.csv_path);
    let catalog = Arc::new(TrialCatalog::from_csv_path(&csv_path)?);

    let engine = MatchEngine::new(ScoringWeights::default())?;
    let service = MatchService::new(engine, catalog);
    let ranked = service.rank_patient(&patient)?;

    println!(
        "{:<5} | {:<6} | {:<6} | {:<12} | Title",
        "Rank", "Raw", "Prob", "Confidence"
    );
    println!("{}", "-".repeat(90));
    for (rank, result) in ranked.iter().take(args.top).enumerate() {
        let title: String = result.title.chars().take(60).collect();
        println!(
            "{:<5} | {:<6.1} | {:<6.3} | {:<12} | {}",
            rank + 1,
            result.raw_score,
            result.probability,
            result.confidence.label(),
            title
        );
    }
    println!("{}", "-".repeat(90));
    println!("{} trials ranked", ranked.len());

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
