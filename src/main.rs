use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use client_manager::web::{self, AppState};
use client_manager::{config, db};

/// Serve the client roster over HTTP.
#[derive(Parser, Debug)]
#[command(name = "client_manager", version)]
struct Args {
    /// Address to listen on, overriding BIND_ADDR
    #[arg(long)]
    bind: Option<String>,

    /// Clients per index page, overriding PAGE_SIZE
    #[arg(long)]
    page_size: Option<i64>,

    /// Do not insert the sample roster into an empty store
    #[arg(long)]
    no_seed: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("client_manager=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = config::init().context("failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if args.no_seed {
        config.seed_data = false;
    }

    let db = db::init(&config)
        .await
        .context("failed to initialize database")?;

    if config.seed_data {
        db::seed::seed_if_empty(&db)
            .await
            .context("failed to seed sample clients")?;
    }

    let app = web::router(AppState::new(db, config.page_size));

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "client manager listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    Ok(())
}
