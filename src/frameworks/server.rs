// Framework bootstrap for the restaurant web front-end.

use crate::frameworks::config::{self, Settings};
use crate::interface_adapters::clients::{
    ApiHttp, AuthClient, BookingClient, MenuClient, TableClient,
};
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::{AppState, InMemorySessionStore, SystemClock};

use std::net::SocketAddr;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Serves on an already bound listener; no global side effects.
pub async fn run(listener: tokio::net::TcpListener, settings: Settings) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&settings)?;
    let app = app(state);

    tracing::info!(%address, api = %settings.api_base_url, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let settings = Settings::load().map_err(|e| {
        tracing::error!(error = %e, "invalid configuration");
        std::io::Error::other(e)
    })?;

    let address: SocketAddr = format!("{}:{}", settings.bind_host, settings.http_port)
        .parse()
        .map_err(|e| {
            tracing::error!(host = %settings.bind_host, error = %e, "invalid bind address");
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
        })?;

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, settings).await
}

fn build_state(settings: &Settings) -> Result<Arc<AppState>> {
    let api = ApiHttp::new(settings.api_base_url.clone(), settings.api_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize API client: {e}")))?;
    tracing::debug!(
        api_base_url = %api.base_url(),
        api_timeout_ms = settings.api_timeout.as_millis(),
        "API client configured"
    );

    let clock = Arc::new(SystemClock);
    let sessions = InMemorySessionStore::new(clock.clone(), settings.session_idle_timeout);
    sessions.spawn_sweeper(config::SESSION_SWEEP_INTERVAL);

    Ok(Arc::new(AppState {
        auth: Arc::new(AuthClient::new(api.clone())),
        menu: Arc::new(MenuClient::new(api.clone())),
        tables: Arc::new(TableClient::new(api.clone())),
        bookings: Arc::new(BookingClient::new(api)),
        sessions: Arc::new(sessions),
        clock,
        booking_app_url: settings.booking_app_url.clone(),
    }))
}
