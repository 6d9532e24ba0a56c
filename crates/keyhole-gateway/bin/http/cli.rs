use clap::{Parser, ValueEnum};
use keyhole_shortener::config::{DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "KEYHOLE_GATEWAY_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "KEYHOLE_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "KEYHOLE_MYSQL_DSN";
pub const STRATEGY_ENV: &str = "KEYHOLE_ALLOCATOR_STRATEGY";
pub const CODE_LENGTH_ENV: &str = "KEYHOLE_CODE_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "KEYHOLE_MAX_ATTEMPTS";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    #[value(name = "random")]
    Random,
    #[value(name = "digest")]
    Digest,
}

impl Display for StrategyArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyArg::Random => write!(f, "random"),
            StrategyArg::Digest => write!(f, "digest"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "keyhole-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STRATEGY_ENV,
        value_enum,
        default_value_t = StrategyArg::Random
    )]
    pub strategy: StrategyArg,

    #[arg(long, env = CODE_LENGTH_ENV, default_value_t = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,

    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,
}
