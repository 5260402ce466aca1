//! Demo server: a single controller served by the MVC router.
//!
//! Responds on `/` (explicit route), `/welcome/index`, and
//! `/welcome/health` (convention routes). Pass a TOML config path as the
//! first argument to override the defaults.

use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mvc_router::config::load_config;
use mvc_router::{ActionTable, BaseController, Controller, RequestLog, RouterBuilder, RouterConfig};

#[derive(Default)]
struct Welcome {
    base: BaseController,
}

impl Welcome {
    fn index(&mut self) {
        self.base.write(b"<h1>mvc-router is serving</h1>");
        self.base.html(StatusCode::OK);
    }

    fn health(&mut self) {
        self.base
            .render_json(&serde_json::json!({ "status": "ok" }), StatusCode::OK);
    }
}

impl Controller for Welcome {
    fn base(&mut self) -> &mut BaseController {
        &mut self.base
    }

    fn routes(&self) -> Vec<String> {
        vec!["get;/;Index".to_string()]
    }

    fn actions() -> ActionTable<Self> {
        ActionTable::new()
            .with("Index", Self::index)
            .with("Health", Self::health)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mvc_router=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("mvc-router demo v0.1.0 starting");

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => RouterConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes_file = config.routes_file.as_deref().unwrap_or("<none>"),
        "configuration loaded"
    );

    let mut builder = RouterBuilder::with_config(&config)?;
    if let Some(path) = &config.routes_file {
        builder.load_routes_file(path)?;
    }
    builder.add_with(Welcome::default(), vec![Arc::new(RequestLog)])?;
    let router = builder.build()?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    router.serve(listener).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
