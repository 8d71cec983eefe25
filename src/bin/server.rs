use std::{error::Error, fs::OpenOptions, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use sage_ledger::{AppState, build_cors_layer, build_router, graceful_shutdown, logging_middleware};

/// The REST API server for the Sage ledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "LEDGER_DB_PATH")]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, env = "LEDGER_PORT", default_value_t = 8000)]
    port: u16,

    /// The canonical name of the timezone that dates are displayed and entered in.
    #[arg(long, env = "LEDGER_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// How long a database call may take, in milliseconds, before the request fails.
    #[arg(long, env = "LEDGER_STORAGE_TIMEOUT_MS", default_value_t = 5000)]
    storage_timeout_ms: u64,

    /// The origin of the browser client that may call the API.
    #[arg(long, env = "LEDGER_ALLOWED_ORIGIN", default_value = "http://localhost:4200")]
    allowed_origin: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging()?;

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let conn = Connection::open(&args.db_path)?;
    let state = AppState::new(
        conn,
        &args.timezone,
        Duration::from_millis(args.storage_timeout_ms),
    )?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(build_cors_layer(&args.allowed_origin)?);
    let router = add_tracing_layer(router);

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

fn setup_logging() -> Result<(), Box<dyn Error>> {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();
    let stdout_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(stdout_log.with_filter(stdout_filter))
        .with(debug_log.with_filter(filter::LevelFilter::DEBUG))
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            // Query strings can contain bank account numbers.
            let path = req.uri().path();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %path, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
