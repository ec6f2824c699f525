mod api;
mod auth;
mod config;
mod database;
mod store;
mod utils;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::config::Args;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let connection = database::setup_database(&args).await?;

    let app = api::router(connection);
    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!("AutoERGen 服务已启动，监听 {}:{}", args.host, args.port);
    axum::serve(listener, app).await?;

    Ok(())
}
