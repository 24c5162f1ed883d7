use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scantry_core::Database;
use scantry_server::{AppState, create_app};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "scantry-server")]
#[command(about = "Barcode-scanning inventory API with live scan streaming")]
struct Cli {
    /// Server port
    #[arg(short, long, env = "SCANTRY_PORT", default_value_t = 3000)]
    port: u16,

    /// Server host
    #[arg(long, env = "SCANTRY_HOST", default_value = "0.0.0.0")]
    host: String,

    /// SQLite database URL, e.g. sqlite://scantry.db
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://scantry.db")]
    database_url: String,

    /// Directory of static assets served for non-API paths
    #[arg(long, env = "SCANTRY_PUBLIC_DIR", default_value = "public")]
    public_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenvy::dotenv().is_ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if env_loaded {
        info!("loaded .env file");
    }

    let db = Database::connect(&cli.database_url)
        .await
        .with_context(|| format!("failed to open database at {}", cli.database_url))?;
    db.initialize_schema()
        .await
        .context("failed to initialize database schema")?;
    db.seed_sample_products()
        .await
        .context("failed to seed sample products")?;

    let state = AppState::new(db, cli.public_dir);
    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .context("invalid host/port")?;
    info!("Starting Scantry server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
