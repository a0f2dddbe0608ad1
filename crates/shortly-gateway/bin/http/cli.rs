use clap::{Parser, ValueEnum};
use shortly_telemetry::Environment;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_ENV: &str = "SHORTLY_ENV";
pub const LISTEN_ADDR_ENV: &str = "SHORTLY_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "SHORTLY_STORAGE_BACKEND";
pub const STORAGE_PATH_ENV: &str = "SHORTLY_STORAGE_PATH";
pub const TIMEOUT_ENV: &str = "SHORTLY_TIMEOUT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8082";
pub const DEFAULT_STORAGE_PATH: &str = "./storage/storage.db";
pub const DEFAULT_TIMEOUT_SECS: &str = "4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvArg {
    Local,
    Dev,
    Prod,
}

impl From<EnvArg> for Environment {
    fn from(value: EnvArg) -> Self {
        match value {
            EnvArg::Local => Environment::Local,
            EnvArg::Dev => Environment::Dev,
            EnvArg::Prod => Environment::Prod,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "sqlite")]
    Sqlite,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
            StorageBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shortly", version)]
pub struct CLI {
    #[arg(long, env = ENV_ENV, value_enum, default_value_t = EnvArg::Local)]
    pub env: EnvArg,

    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = STORAGE_PATH_ENV, default_value = DEFAULT_STORAGE_PATH)]
    pub storage_path: PathBuf,

    /// Upper bound on a single request, in seconds.
    #[arg(long, env = TIMEOUT_ENV, default_value = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl CLI {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
