mod agenda;
mod compromisso;
mod notification;
mod push_subscription;
mod shared;

use agenda::{IAgendaRepo, InMemoryAgendaRepo, PostgresAgendaRepo};
use compromisso::{ICompromissoRepo, InMemoryCompromissoRepo, PostgresCompromissoRepo};
use notification::{INotificationRepo, InMemoryNotificationRepo, PostgresNotificationRepo};
use push_subscription::{
    IPushSubscriptionRepo, InMemoryPushSubscriptionRepo, PostgresPushSubscriptionRepo,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub agendas: Arc<dyn IAgendaRepo>,
    pub compromissos: Arc<dyn ICompromissoRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
    pub push_subscriptions: Arc<dyn IPushSubscriptionRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            agendas: Arc::new(PostgresAgendaRepo::new(pool.clone())),
            compromissos: Arc::new(PostgresCompromissoRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            push_subscriptions: Arc::new(PostgresPushSubscriptionRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            agendas: Arc::new(InMemoryAgendaRepo::new()),
            compromissos: Arc::new(InMemoryCompromissoRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            push_subscriptions: Arc::new(InMemoryPushSubscriptionRepo::new()),
        }
    }
}
