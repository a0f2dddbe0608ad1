//! Process-wide tracing setup.
//!
//! [`Telemetry`] is built once in `main` from the deployment
//! [`Environment`] and installed before anything else logs.

use std::fmt::{Display, Formatter};

use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to bridge log records: {0}")]
    Logger(#[from] tracing_log::log::SetLoggerError),
    #[error("failed to install subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Deployment environment, which decides log format and verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Human-readable output at `debug`.
    #[default]
    Local,
    /// JSON at `debug`.
    Dev,
    /// JSON at `info`.
    Prod,
}

impl Environment {
    pub fn default_directive(&self) -> &'static str {
        match self {
            Environment::Local | Environment::Dev => "debug",
            Environment::Prod => "info",
        }
    }

    pub fn is_json(&self) -> bool {
        !matches!(self, Environment::Local)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "local"),
            Environment::Dev => write!(f, "dev"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

pub struct Telemetry {
    environment: Environment,
    filter: EnvFilter,
}

impl Telemetry {
    /// `RUST_LOG` takes precedence over the environment's default level.
    pub fn new(environment: Environment) -> Self {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(environment.default_directive()));
        Self {
            environment,
            filter,
        }
    }

    pub fn with_filter(environment: Environment, filter: EnvFilter) -> Self {
        Self {
            environment,
            filter,
        }
    }

    /// Builds the subscriber without installing it.
    pub fn subscriber(self) -> Box<dyn Subscriber + Send + Sync> {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.filter)
            .with_target(true);

        if self.environment.is_json() {
            Box::new(builder.json().flatten_event(true).finish())
        } else {
            Box::new(builder.pretty().finish())
        }
    }

    /// Installs the subscriber as the global default and routes `log`
    /// records from dependencies through it. Call once per process.
    pub fn init(self) -> Result<(), TelemetryError> {
        tracing_log::LogTracer::init()?;
        tracing::subscriber::set_global_default(self.subscriber())?;
        Ok(())
    }
}
