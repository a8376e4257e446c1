//! Demo server for the method router.
//!
//! ```text
//!   GET    /ping         → "pong"
//!   GET    /items        → list items
//!   POST   /items        → create item
//!   GET    /items/{id}   → fetch item
//!   DELETE /items/{id}   → delete item
//! ```

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use clap::Parser;
use serde_json::json;
use tokio::net::TcpListener;

use method_router::config::{load_config, ServerConfig};
use method_router::lifecycle::signals::shutdown_on_ctrl_c;
use method_router::observability::init_logging;
use method_router::{HttpServer, RouteParams, Router, Shutdown};

#[derive(Parser)]
#[command(name = "method-router")]
#[command(about = "Serve a small demo API through the method router", long_about = None)]
struct Cli {
    /// TOML config file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.logging)?;
    tracing::info!("method-router v0.1.0 starting");

    let server = HttpServer::new(demo_router());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        if let Err(e) = shutdown_on_ctrl_c(&shutdown).await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    });

    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn demo_router() -> Router {
    let mut router = Router::new();
    router
        .get("/ping", ping)
        .get("/items", list_items)
        .post("/items", create_item)
        .get("/items/{id}", get_item)
        .delete("/items/{id}", delete_item);
    router
}

async fn ping(_req: Request<Body>) -> &'static str {
    "pong"
}

async fn list_items(_req: Request<Body>) -> impl IntoResponse {
    Json(json!({ "items": [] }))
}

async fn create_item(_req: Request<Body>) -> impl IntoResponse {
    (StatusCode::CREATED, Json(json!({ "created": true })))
}

async fn get_item(req: Request<Body>) -> impl IntoResponse {
    let id = item_id(&req);
    Json(json!({ "id": id }))
}

async fn delete_item(req: Request<Body>) -> impl IntoResponse {
    tracing::info!(id = %item_id(&req), "Deleting item");
    StatusCode::NO_CONTENT
}

fn item_id(req: &Request<Body>) -> String {
    req.extensions()
        .get::<RouteParams>()
        .and_then(|p| p.get("id"))
        .unwrap_or_default()
        .to_string()
}
