use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::debug;

use super::DashboardController;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Re-runs the health check on a fixed cadence. The schedule is anchored when
/// `spawn` is called: the first tick fires one period later, the initial
/// check belongs to the page load.
///
/// Each check runs in its own task, so a request that outlives the period
/// overlaps with the next one instead of delaying it.
pub struct HealthPoller {
    controller: DashboardController,
    period: Duration,
}

impl HealthPoller {
    pub fn new(controller: DashboardController, period: Duration) -> Self {
        Self { controller, period }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        let start = Instant::now() + self.period;
        tokio::spawn(async move {
            let mut ticker = interval_at(start, self.period);
            loop {
                ticker.tick().await;
                debug!("Periodic health check");
                let controller = self.controller.clone();
                tokio::spawn(async move {
                    controller.check_health().await;
                });
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{self, testing::ScriptedBackend};
    use crate::dom::{Document, RetentionPolicy};
    use serde_json::json;
    use std::sync::Arc;

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_every_period() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.respond(api::HEALTH, json!({"status": "running", "bybit_connected": true}));
        let controller =
            DashboardController::new(backend.clone(), Document::dashboard(RetentionPolicy::default()));

        let handle = HealthPoller::new(controller, DEFAULT_POLL_INTERVAL).spawn();
        settle().await;
        assert_eq!(backend.count(api::HEALTH), 0);

        tokio::time::advance(Duration::from_secs(29)).await;
        settle().await;
        assert_eq!(backend.count(api::HEALTH), 0);

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(backend.count(api::HEALTH), 1);

        for expected in 2..=5 {
            tokio::time::advance(DEFAULT_POLL_INTERVAL).await;
            settle().await;
            assert_eq!(backend.count(api::HEALTH), expected);
        }

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_keeps_polling_after_failures() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.fail(api::HEALTH, "network down");
        let controller =
            DashboardController::new(backend.clone(), Document::dashboard(RetentionPolicy::default()));

        let handle = HealthPoller::new(controller.clone(), Duration::from_secs(30)).spawn();
        for _ in 0..3 {
            tokio::time::advance(Duration::from_secs(30)).await;
            settle().await;
        }

        assert_eq!(backend.count(api::HEALTH), 3);
        let doc = controller.snapshot().await;
        let failures = doc
            .log()
            .entries()
            .filter(|e| e.message.contains("network down"))
            .count();
        assert_eq!(failures, 3);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_starts_at_spawn_not_first_poll() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.respond(api::HEALTH, json!({"status": "running", "bybit_connected": true}));
        let controller =
            DashboardController::new(backend.clone(), Document::dashboard(RetentionPolicy::default()));

        // the poller task has not run yet when the clock moves
        let handle = HealthPoller::new(controller, DEFAULT_POLL_INTERVAL).spawn();
        tokio::time::advance(Duration::from_secs(45)).await;
        settle().await;
        assert_eq!(backend.count(api::HEALTH), 1);

        tokio::time::advance(Duration::from_secs(15)).await;
        settle().await;
        assert_eq!(backend.count(api::HEALTH), 2);

        handle.abort();
    }
}
