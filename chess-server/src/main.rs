use anyhow::Result;
use chess_server::{router, ServerConfig};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 未设置 RUST_LOG 时的日志过滤
const DEFAULT_LOG_FILTER: &str = "chess_server=debug,chess_ai=info";

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let config = ServerConfig::parse();
    let ai_config = config.ai_config()?;

    info!("中国象棋走法服务启动中，监听 {}", config.listen);

    let listener = TcpListener::bind(config.listen).await?;
    axum::serve(listener, router(ai_config)).await?;

    Ok(())
}
