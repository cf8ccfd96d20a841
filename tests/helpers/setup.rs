use jsonwebtoken::{encode, EncodingKey, Header};
use planner_api::{Application, Claims};
use planner_domain::{Tz, ID};
use planner_infra::{setup_context, Config, StaticTimeSys};
use planner_sdk::PlannerSDK;
use std::sync::Arc;

pub struct TestApp {
    pub config: Config,
    pub address: String,
}

impl TestApp {
    /// Client authenticated as `user_id`
    pub fn user_sdk(&self, user_id: &ID) -> PlannerSDK {
        let claims = Claims {
            exp: 4_000_000_000,
            sub: user_id.to_string(),
            email: None,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .expect("Expected to sign user token");
        PlannerSDK::new(self.address.clone(), token)
    }

    pub fn service_sdk(&self) -> PlannerSDK {
        PlannerSDK::service(self.address.clone(), self.config.service_role_key.clone())
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    spawn(None).await
}

/// Same as `spawn_app` with the clock of the application pinned at
/// `timestamp_millis`
pub async fn spawn_app_at(timestamp_millis: i64) -> TestApp {
    spawn(Some(timestamp_millis)).await
}

async fn spawn(timestamp_millis: Option<i64>) -> TestApp {
    let mut ctx = setup_context().await.expect("Expected to setup context");
    ctx.config.port = 0; // Random port
    ctx.config.timezone = Tz::UTC;
    ctx.config.vapid = None;
    ctx.config.notifications.job_interval_secs = None;
    if let Some(timestamp_millis) = timestamp_millis {
        ctx.sys = Arc::new(StaticTimeSys { timestamp_millis });
    }

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp { config, address }
}
