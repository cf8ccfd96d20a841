use crate::{notification::SendPendingNotificationsUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval_at, Instant};
use planner_infra::PlannerContext;
use std::time::Duration;
use tracing::{error, info};

/// Seconds to wait so that a job runs `secs_before_min` seconds before a
/// minute boundary
pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Runs the notification worker every `job_interval_secs`, starting at the
/// next minute boundary. Does nothing when no interval is configured.
pub fn start_send_notifications_job(ctx: PlannerContext) {
    let every_secs = match ctx.config.notifications.job_interval_secs {
        Some(secs) if secs > 0 => secs,
        _ => return,
    };
    info!("Delivering due notifications every {} seconds", every_secs);

    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        let mut job_interval = interval_at(start, Duration::from_secs(every_secs));
        loop {
            job_interval.tick().await;
            let usecase = SendPendingNotificationsUseCase {
                config: ctx.config.notifications.clone(),
            };
            match execute(usecase, &ctx).await {
                Ok(reports) if !reports.is_empty() => {
                    let failed = reports.iter().filter(|r| !r.ok).count();
                    info!(
                        "Notification job delivered {} and failed {}",
                        reports.len() - failed,
                        failed
                    );
                }
                Ok(_) => {}
                Err(e) => error!("Notification job failed: {:?}", e),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
