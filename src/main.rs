use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod age;
mod cann;
mod config;
mod fpl;
mod standings;
mod web;

use config::Config;
use fpl::FplClient;
use standings::FootballData;
use web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let standings = FootballData::new(
        &config.football_api_url,
        &config.competition,
        &config.api_token,
        config.http_timeout_secs,
    )?;
    let fpl = FplClient::new(&config.fpl_api_url, config.http_timeout_secs)?;

    if config.managers.is_empty() {
        info!("No FPL managers configured; /fpl will return an error until MANAGERS is set");
    }

    let state = AppState {
        standings: Arc::new(standings),
        fpl,
        managers: config.managers.clone(),
    };

    let app = web::router(state);
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
