mod cli;

use crate::cli::{StorageBackendArg, StrategyArg, CLI};
use anyhow::Context;
use clap::Parser;
use keyhole_allocator::{DigestAllocator, RandomAllocator};
use keyhole_core::{LinkStore, Shortener};
use keyhole_gateway::app::App;
use keyhole_gateway::state::AppState;
use keyhole_shortener::{LinkService, ShortenerConfig};
use keyhole_storage::{InMemoryStore, MySqlStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = CLI::try_parse()?;
    anyhow::ensure!(
        (3..=32).contains(&config.code_length),
        "code length must be between 3 and 32, got {}",
        config.code_length
    );
    anyhow::ensure!(config.max_attempts > 0, "max attempts must be at least 1");

    let shortener_config = ShortenerConfig::builder()
        .code_length(config.code_length)
        .max_attempts(config.max_attempts)
        .build();

    info!(
        listen_addr = %config.listen_addr,
        strategy = %config.strategy,
        storage = %config.storage,
        code_length = config.code_length,
        max_attempts = config.max_attempts,
        "starting keyhole gateway"
    );

    let shortener = match config.storage {
        StorageBackendArg::InMemory => {
            build_shortener(InMemoryStore::new(), config.strategy, shortener_config)
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .context("mysql dsn is required when storage backend is mysql")?;
            let store = MySqlStore::connect(&mysql_dsn).await?;
            build_shortener(store, config.strategy, shortener_config)
        }
    };

    let router = App::router(AppState::new(shortener));
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn build_shortener<S: LinkStore>(
    store: S,
    strategy: StrategyArg,
    config: ShortenerConfig,
) -> Arc<dyn Shortener> {
    match strategy {
        StrategyArg::Random => Arc::new(LinkService::new(
            store,
            RandomAllocator::new(config.code_length),
            config,
        )),
        StrategyArg::Digest => Arc::new(LinkService::new(
            store,
            DigestAllocator::new(config.code_length),
            config,
        )),
    }
}
