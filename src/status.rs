use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::QuizApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Unknown,
    Connected,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub status: ConnectionStatus,
    pub label: &'static str,
    pub checked_at: Option<DateTime<Utc>>,
}

impl StatusReport {
    pub fn unknown() -> Self {
        Self {
            status: ConnectionStatus::Unknown,
            label: "Checking API...",
            checked_at: None,
        }
    }

    fn checked(status: ConnectionStatus, label: &'static str) -> Self {
        Self {
            status,
            label,
            checked_at: Some(Utc::now()),
        }
    }
}

impl Default for StatusReport {
    fn default() -> Self {
        Self::unknown()
    }
}

/// One reachability probe against `/health`.
pub async fn check_status(client: &QuizApiClient) -> StatusReport {
    match client.health().await {
        Ok(()) => StatusReport::checked(ConnectionStatus::Connected, "API Connected"),
        Err(e) if e.is_unreachable() => {
            debug!("Health probe could not reach {}: {}", client.base_url(), e);
            StatusReport::checked(ConnectionStatus::Error, "API Disconnected")
        }
        Err(e) => {
            warn!("Health probe failed: {}", e);
            StatusReport::checked(ConnectionStatus::Error, "API Error")
        }
    }
}

/// Probes immediately, then once per `interval`, forwarding each report through `map`.
///
/// The task ends once the receiving side of `tx` is dropped.
pub fn spawn_poller<E, F>(
    client: QuizApiClient,
    interval: Duration,
    tx: UnboundedSender<E>,
    map: F,
) -> JoinHandle<()>
where
    E: Send + 'static,
    F: Fn(StatusReport) -> E + Send + 'static,
{
    tokio::spawn(async move {
        info!("Status poller started (every {}s)", interval.as_secs());
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let report = check_status(&client).await;
            if tx.send(map(report)).is_err() {
                debug!("Status poller stopping: receiver closed");
                break;
            }
        }
    })
}
