use std::sync::Arc;

use eyre::Result;
use tracing_subscriber::EnvFilter;

use thyro_client::HttpClient;
use thyro_web::config::WebConfig;
use thyro_web::session::Session;
use thyro_web::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = WebConfig::from_env()?;
    init_tracing(config.log_json);

    let api = Arc::new(HttpClient::new(&config.api_base_url, config.api_timeout));
    tracing::info!(api = %config.api_base_url, timeout = ?config.api_timeout, "using patient API");

    let state = AppState::new(Session::new(api));
    state.run(Session::init).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, thyro_web::router(state)).await?;
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
