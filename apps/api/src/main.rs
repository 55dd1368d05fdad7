mod config;
mod dispatch;
mod errors;
mod extraction;
mod ingest;
mod llm_client;
mod models;
mod outreach;
mod pipeline;
mod recruiter;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dispatch::smtp::SmtpMailer;
use crate::ingest::page_loader::HttpPageLoader;
use crate::llm_client::LlmClient;
use crate::outreach::portfolio::Portfolio;
use crate::recruiter::hunter::HunterClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Outreach API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.llm_api_url.clone(), config.groq_api_key.clone());
    info!(
        "LLM client initialized (extraction: {}, drafting: {})",
        llm_client::EXTRACTION_MODEL,
        llm_client::DRAFTING_MODEL
    );

    if config.hunter_api_key.is_none() {
        warn!("HUNTER_API_KEY not set; recruiter email lookup is disabled");
    }
    let contacts = HunterClient::new(config.hunter_api_key.clone());

    if config.mailbox_user.is_none() || config.mailbox_oauth_token.is_none() {
        warn!("MAILBOX_USER / MAILBOX_OAUTH_TOKEN not set; sending will fail");
    }
    let mailer = SmtpMailer::from_config(&config);

    let portfolio = Portfolio::load_or_empty(&config.portfolio_csv);

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        pages: Arc::new(HttpPageLoader::new()),
        contacts: Arc::new(contacts),
        mailer: Arc::new(mailer),
        portfolio: Arc::new(portfolio),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
