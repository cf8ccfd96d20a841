use chrono_tz::Tz;
use planner_utils::create_random_secret;
use std::{fmt, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Shared secret that service callers send in the `x-service-role`
    /// header to use the notification routes
    pub service_role_key: String,
    /// HS256 secret used to verify user bearer tokens
    pub jwt_secret: String,
    /// Timezone in which agenda and compromisso dates and times are
    /// interpreted when computing reminder send times
    pub timezone: Tz,
    pub notifications: NotificationConfig,
    /// Web Push is only available when VAPID keys are configured
    pub vapid: Option<VapidConfig>,
}

/// Everything the notification worker and scheduler need. A copy of this is
/// handed to each worker run.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationConfig {
    /// Maximum number of notifications handled by one worker run
    pub batch_size: usize,
    /// How long before an entry starts its reminder is sent
    pub lead_minutes: i64,
    /// Failed deliveries are retried until this many attempts were made
    pub max_attempts: i64,
    /// Claims older than this are considered abandoned by a crashed run
    pub claim_lease_millis: i64,
    pub webhook_timeout_secs: u64,
    /// Maximum number of rows returned when listing pending notifications
    pub pending_list_limit: usize,
    /// When set the worker also runs in-process on this interval
    pub job_interval_secs: Option<u64>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            lead_minutes: 30,
            max_attempts: 5,
            claim_lease_millis: 1000 * 60 * 5,
            webhook_timeout_secs: 10,
            pending_list_limit: 100,
            job_interval_secs: None,
        }
    }
}

#[derive(Clone)]
pub struct VapidConfig {
    /// Base64 url-safe encoded public key handed to browsers
    pub public_key: String,
    /// Base64 url-safe encoded private key used to sign push requests
    pub private_key: String,
    /// Contact of the application server, `mailto:` or `https:`
    pub subject: String,
}

impl fmt::Debug for VapidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VapidConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("subject", &self.subject)
            .finish()
    }
}

fn env_or_default<T: FromStr + fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn env_secret(name: &str, description: &str) -> String {
    match std::env::var(name) {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            info!(
                "Did not find {} environment variable. Going to create one.",
                name
            );
            let secret = create_random_secret(32);
            info!("The {} was generated and set to: {}", description, secret);
            secret
        }
    }
}

impl NotificationConfig {
    fn from_env() -> Self {
        let default = Self::default();
        let job_interval_secs = match std::env::var("NOTIFICATION_JOB_INTERVAL_SECS") {
            Ok(interval) => match interval.parse::<u64>() {
                Ok(0) => None,
                Ok(interval) => Some(interval),
                Err(_) => {
                    warn!(
                        "The given NOTIFICATION_JOB_INTERVAL_SECS: {} is not valid, the notification job is disabled.",
                        interval
                    );
                    None
                }
            },
            Err(_) => None,
        };
        Self {
            batch_size: env_or_default("NOTIFICATION_BATCH_SIZE", default.batch_size),
            lead_minutes: env_or_default("NOTIFICATION_LEAD_MINUTES", default.lead_minutes),
            max_attempts: env_or_default("NOTIFICATION_MAX_ATTEMPTS", default.max_attempts),
            claim_lease_millis: env_or_default(
                "NOTIFICATION_CLAIM_LEASE_SECS",
                default.claim_lease_millis / 1000,
            )
            .saturating_mul(1000),
            webhook_timeout_secs: env_or_default(
                "WEBHOOK_TIMEOUT_SECS",
                default.webhook_timeout_secs,
            ),
            pending_list_limit: default.pending_list_limit,
            job_interval_secs,
        }
        .clamped()
    }

    /// Pulls every setting back into the range the worker can operate with
    fn clamped(self) -> Self {
        Self {
            batch_size: self.batch_size.max(1),
            lead_minutes: self.lead_minutes.max(0),
            max_attempts: self.max_attempts.max(1),
            claim_lease_millis: self.claim_lease_millis.clamp(1000, 1000 * 60 * 60 * 24),
            webhook_timeout_secs: self.webhook_timeout_secs.max(1),
            ..self
        }
    }
}

impl VapidConfig {
    fn from_env() -> Option<Self> {
        match (
            std::env::var("VAPID_PUBLIC_KEY"),
            std::env::var("VAPID_PRIVATE_KEY"),
        ) {
            (Ok(public_key), Ok(private_key)) => {
                let subject = std::env::var("VAPID_SUBJECT")
                    .unwrap_or_else(|_| "mailto:admin@example.com".into());
                Some(Self {
                    public_key,
                    private_key,
                    subject,
                })
            }
            _ => {
                warn!("VAPID_PUBLIC_KEY and VAPID_PRIVATE_KEY are not set. Web Push delivery is disabled.");
                None
            }
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let port = env_or_default("PORT", 5000);
        let service_role_key = env_secret("SERVICE_ROLE_KEY", "service role key");
        let jwt_secret = env_secret("JWT_SECRET", "jwt secret");
        let default_timezone = Tz::America__Sao_Paulo;
        let timezone = match std::env::var("TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given TIMEZONE: {} is not valid, falling back to the default timezone: {}.",
                        tz, default_timezone
                    );
                    default_timezone
                }
            },
            Err(_) => default_timezone,
        };

        Self {
            port,
            service_role_key,
            jwt_secret,
            timezone,
            notifications: NotificationConfig::from_env(),
            vapid: VapidConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
