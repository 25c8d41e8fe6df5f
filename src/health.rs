use std::fmt;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::remote::RecommendationService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    LocalMode,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Connected => f.write_str("connected"),
            ConnectionStatus::LocalMode => f.write_str("local mode"),
        }
    }
}

/// A failed probe only flips the status indicator; it is never an error.
pub async fn check(service: &dyn RecommendationService) -> ConnectionStatus {
    match service.health().await {
        Ok(report) => {
            debug!(
                status = report.status.as_deref().unwrap_or("unknown"),
                server_time = report.timestamp.as_deref().unwrap_or("unknown"),
                activities = report.activities_count.unwrap_or_default(),
                "health probe succeeded"
            );
            ConnectionStatus::Connected
        }
        Err(err) => {
            debug!(error = %err, "health probe failed");
            ConnectionStatus::LocalMode
        }
    }
}

/// Probes the service every `interval` and reports status transitions,
/// starting with the first probe. Runs forever when `limit` is `None`.
pub async fn watch<F>(
    service: &dyn RecommendationService,
    interval: Duration,
    limit: Option<usize>,
    mut on_change: F,
) where
    F: FnMut(ConnectionStatus),
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last: Option<ConnectionStatus> = None;
    let mut probes = 0usize;

    loop {
        if limit.is_some_and(|limit| probes >= limit) {
            break;
        }
        ticker.tick().await;
        probes += 1;

        let status = check(service).await;
        if last != Some(status) {
            match status {
                ConnectionStatus::Connected => info!("recommendation service reachable"),
                ConnectionStatus::LocalMode => {
                    warn!("recommendation service unreachable, recommendations will be local")
                }
            }
            on_change(status);
            last = Some(status);
        }
    }
}
