mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, NotificationConfig, VapidConfig};
pub use repos::{DeleteResult, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{info, warn};

#[derive(Clone)]
pub struct PlannerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
}

impl PlannerContext {
    fn new(repos: Repos, config: Config) -> Self {
        let notifier = Arc::new(ChannelNotifier::new(&config));
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        }
    }

    async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let repos = Repos::create_postgres(connection_string).await?;
        Ok(Self::new(repos, Config::new()))
    }

    /// Context backed by in-memory repositories. State is lost on restart.
    pub fn create_inmemory() -> Self {
        Self::new(Repos::create_inmemory(), Config::new())
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<PlannerContext> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) => {
            info!("Using postgres storage");
            PlannerContext::create_postgres(&connection_string).await
        }
        Err(_) => {
            warn!(
                "{} env var is not present. Falling back to in-memory storage, data will be lost on restart.",
                PSQL_CONNECTION_STRING
            );
            Ok(PlannerContext::create_inmemory())
        }
    }
}
