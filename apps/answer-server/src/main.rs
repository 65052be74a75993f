//! Compliance answer server
//!
//! Answers free-text compliance questionnaire questions from a static
//! catalog of compliance frameworks. Provides REST endpoints for:
//!
//! - Primary answers with topic context (`POST /api/answer`)
//! - Vendor-voice fallback answers quoting framework obligations
//!   (`POST /api/ask-fallback`)
//! - Catalog listing and health
//!
//! ## Architecture
//!
//! The catalog is loaded once before the listener starts and shared
//! read-only by every request. Matching and synthesis are synchronous and
//! live in `compliance-engine`; this binary only handles HTTP concerns:
//!
//! - Rate limiting via tower-governor
//! - Permissive CORS for the trust portal and questionnaire front ends
//! - JSON error envelopes, including for handler panics

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use clap::{builder::RangedU64ValueParser, Parser};
use compliance_engine::{AnswerOptions, ComplianceCatalog, ComplianceEngine};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
#[cfg(test)]
mod tests;

use api::{
    handle_answer, handle_ask_fallback, handle_health, handle_list_records,
    handle_method_not_allowed, preflight_no_content,
};

/// Command-line arguments for the answer server
#[derive(Parser, Debug)]
#[command(name = "answer-server")]
#[command(about = "Compliance questionnaire answer server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// JSON file of compliance records (defaults to the built-in catalog)
    #[arg(long, env = "COMPLIANCE_RECORDS_PATH")]
    records: Option<PathBuf>,

    /// Records considered by POST /api/answer
    #[arg(
        long,
        default_value = "3",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=50)
    )]
    answer_top_n: usize,

    /// Records considered by POST /api/ask-fallback
    #[arg(
        long,
        default_value = "5",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=50)
    )]
    fallback_top_n: usize,

    /// Rate limit: requests per second per IP
    #[arg(long, env = "RATE_LIMIT", default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: ComplianceEngine,
    /// Simple answers for POST /api/answer
    pub answer_options: AnswerOptions,
    /// Vendor-voice answers for POST /api/ask-fallback
    pub fallback_options: AnswerOptions,
}

impl AppState {
    pub fn new(catalog: ComplianceCatalog, answer_top_n: usize, fallback_top_n: usize) -> Self {
        Self {
            engine: ComplianceEngine::new(catalog),
            answer_options: AnswerOptions {
                top_n: answer_top_n,
                vendor_style: false,
            },
            fallback_options: AnswerOptions {
                top_n: fallback_top_n,
                vendor_style: true,
            },
        }
    }
}

/// Build the router without rate limiting, which needs peer addresses
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // Catalog
        .route("/api/records", get(handle_list_records))
        // Answer endpoints
        .route(
            "/api/answer",
            post(handle_answer).fallback(handle_method_not_allowed),
        )
        .route(
            "/api/ask-fallback",
            post(handle_ask_fallback).fallback(handle_method_not_allowed),
        )
        // Apply middleware
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(preflight_no_content))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalog = match &args.records {
        Some(path) => {
            info!("Loading compliance records from {}", path.display());
            ComplianceCatalog::from_path(path)?
        }
        None => {
            info!("Loading built-in compliance records");
            ComplianceCatalog::embedded()?
        }
    };
    info!("Loaded {} compliance records", catalog.len());

    let state = AppState::new(catalog, args.answer_top_n, args.fallback_top_n);

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .ok_or_else(|| anyhow!("Invalid rate limit: {}", args.rate_limit))?,
    );

    let app = app(state).layer(GovernorLayer {
        config: governor_conf,
    });

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!(
        "Top-N: answer={}, fallback={}",
        args.answer_top_n, args.fallback_top_n
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
