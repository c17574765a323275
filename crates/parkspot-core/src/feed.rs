// ── Lot feed ──
//
// Background poller for `/parkinglots`. The first successful poll is
// always published, even when it returns no lots. After that a snapshot
// is published only when it differs from the previous one, so every
// notification downstream is a real change worth re-animating.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Notify, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::gateway::Gateway;
use crate::model::LotOccupancy;
use crate::occupancy::{OccupancySummary, summarize};

type Snapshot = Arc<Vec<LotOccupancy>>;

/// Outcome of the most recent poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedStatus {
    /// Time of the last successful poll.
    pub last_refresh: Option<DateTime<Utc>>,
    /// Error of the last poll, cleared by the next success.
    pub last_error: Option<String>,
}

/// Handle to a running lot poller. Dropping it stops the task.
pub struct LotFeed {
    lots_rx: watch::Receiver<Snapshot>,
    status_rx: watch::Receiver<FeedStatus>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
}

impl LotFeed {
    /// Poll now, then every `period`. A zero period polls only on
    /// [`refresh_now`](Self::refresh_now).
    pub fn spawn(gateway: Gateway, period: Duration) -> Self {
        Self::spawn_with_token(gateway, period, &CancellationToken::new())
    }

    /// Like [`spawn`](Self::spawn), also stopping when `parent` is cancelled.
    pub fn spawn_with_token(
        gateway: Gateway,
        period: Duration,
        parent: &CancellationToken,
    ) -> Self {
        let (lots_tx, lots_rx) = watch::channel(Snapshot::default());
        let (status_tx, status_rx) = watch::channel(FeedStatus::default());
        let refresh = Arc::new(Notify::new());
        let cancel = parent.child_token();

        tokio::spawn(poll_task(
            gateway,
            period,
            lots_tx,
            status_tx,
            Arc::clone(&refresh),
            cancel.clone(),
        ));

        Self {
            lots_rx,
            status_rx,
            refresh,
            cancel,
        }
    }

    /// Subscribe to lot snapshots.
    pub fn lots(&self) -> LotStream {
        LotStream::new(self.lots_rx.clone())
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.lots_rx.borrow().clone()
    }

    pub fn status(&self) -> FeedStatus {
        self.status_rx.borrow().clone()
    }

    /// Receiver notified after every poll, successful or not.
    pub fn subscribe_status(&self) -> watch::Receiver<FeedStatus> {
        self.status_rx.clone()
    }

    /// Poll immediately instead of waiting for the next interval.
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for LotFeed {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_task(
    gateway: Gateway,
    period: Duration,
    lots_tx: watch::Sender<Snapshot>,
    status_tx: watch::Sender<FeedStatus>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
) {
    let polling = !period.is_zero();
    let mut interval = tokio::time::interval(period.max(Duration::from_millis(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the loop below polls up front.
    interval.reset();

    info!(period_secs = period.as_secs(), "lot feed started");

    let mut published = false;
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = poll_once(&gateway, &lots_tx, &status_tx, &mut published) => {}
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = refresh.notified() => {
                debug!("manual lot refresh");
                interval.reset();
            }
            _ = interval.tick(), if polling => {}
        }
    }

    debug!("lot feed stopped");
}

async fn poll_once(
    gateway: &Gateway,
    lots_tx: &watch::Sender<Snapshot>,
    status_tx: &watch::Sender<FeedStatus>,
    published: &mut bool,
) {
    match gateway.lots().await {
        Ok(lots) => {
            let count = lots.len();
            let first = !*published;
            let changed = lots_tx.send_if_modified(|current| {
                if !first && **current == lots {
                    false
                } else {
                    *current = Arc::new(lots);
                    true
                }
            });
            *published = true;
            debug!(count, changed, "lot snapshot polled");
            status_tx.send_replace(FeedStatus {
                last_refresh: Some(Utc::now()),
                last_error: None,
            });
        }
        Err(e) => {
            warn!(error = %e, "lot poll failed");
            status_tx.send_modify(|status| status.last_error = Some(e.to_string()));
        }
    }
}

// ── LotStream ────────────────────────────────────────────────────

/// A subscription to lot snapshots.
///
/// Provides both point-in-time snapshot access and change notification
/// via [`changed`](Self::changed).
pub struct LotStream {
    current: Snapshot,
    receiver: watch::Receiver<Snapshot>,
}

impl LotStream {
    fn new(mut receiver: watch::Receiver<Snapshot>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation or by the last `changed()`.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Summary of [`current`](Self::current).
    pub fn summary(&self) -> OccupancySummary {
        summarize(self.current.iter())
    }

    /// Wait for the next changed snapshot.
    /// Returns `None` once the feed has stopped.
    pub async fn changed(&mut self) -> Option<Snapshot> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::GatewayConfig;

    const WAIT: Duration = Duration::from_secs(5);
    const HOUR: Duration = Duration::from_secs(3600);

    fn lots_body(third_available: u32) -> serde_json::Value {
        json!([
            { "parkinglot_id": 1, "name": "A", "current_capacity": 34, "maximum_capacity": 70 },
            { "parkinglot_id": 2, "name": "B", "current_capacity": 32, "maximum_capacity": 40, "priority": true },
            { "parkinglot_id": 3, "name": "C", "current_capacity": third_available, "maximum_capacity": 100 },
        ])
    }

    fn gateway(server: &MockServer) -> Gateway {
        let url = Url::parse(&server.uri()).unwrap();
        Gateway::new(GatewayConfig::new(url)).unwrap()
    }

    async fn next_status(rx: &mut watch::Receiver<FeedStatus>) -> FeedStatus {
        tokio::time::timeout(WAIT, rx.changed())
            .await
            .unwrap()
            .unwrap();
        rx.borrow_and_update().clone()
    }

    #[tokio::test]
    async fn first_poll_publishes_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parkinglots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lots_body(3)))
            .mount(&server)
            .await;

        let feed = LotFeed::spawn(gateway(&server), HOUR);
        let mut lots = feed.lots();
        let snap = tokio::time::timeout(WAIT, lots.changed())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(snap.len(), 3);
        assert!(snap[1].priority);
        assert_eq!(lots.summary().percentage, 67);
        assert!(feed.status().last_refresh.is_some());
    }

    #[tokio::test]
    async fn first_empty_poll_is_still_published() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parkinglots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let feed = LotFeed::spawn(gateway(&server), HOUR);
        let mut lots = feed.lots();
        let snap = tokio::time::timeout(WAIT, lots.changed())
            .await
            .unwrap()
            .unwrap();

        assert!(snap.is_empty());
        assert_eq!(lots.summary(), OccupancySummary::default());
    }

    #[tokio::test]
    async fn unchanged_snapshot_is_not_republished() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parkinglots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lots_body(3)))
            .mount(&server)
            .await;

        let feed = LotFeed::spawn(gateway(&server), HOUR);
        let mut status = feed.subscribe_status();
        next_status(&mut status).await;

        let mut lots_rx = feed.lots_rx.clone();
        lots_rx.borrow_and_update();
        feed.refresh_now();
        next_status(&mut status).await;

        assert!(!lots_rx.has_changed().unwrap());
        assert_eq!(feed.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn changed_snapshot_is_published() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parkinglots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lots_body(3)))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/parkinglots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lots_body(100)))
            .mount(&server)
            .await;

        let feed = LotFeed::spawn(gateway(&server), HOUR);
        let mut lots = feed.lots();
        tokio::time::timeout(WAIT, lots.changed()).await.unwrap();
        assert_eq!(lots.summary().percentage, 67);

        feed.refresh_now();
        let snap = tokio::time::timeout(WAIT, lots.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snap[2].available, 100);
        assert_eq!(lots.summary().percentage, 21);
    }

    #[tokio::test]
    async fn failed_poll_records_error_and_keeps_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parkinglots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lots_body(3)))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/parkinglots"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "message": "db down" })))
            .mount(&server)
            .await;

        let feed = LotFeed::spawn(gateway(&server), HOUR);
        let mut status = feed.subscribe_status();
        next_status(&mut status).await;

        feed.refresh_now();
        let failed = next_status(&mut status).await;
        assert!(failed.last_error.unwrap().contains("db down"));
        assert!(failed.last_refresh.is_some());
        assert_eq!(feed.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn subscription_ends_when_feed_drops() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/parkinglots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lots_body(3)))
            .mount(&server)
            .await;

        let feed = LotFeed::spawn(gateway(&server), Duration::ZERO);
        let mut lots = feed.lots();
        tokio::time::timeout(WAIT, lots.changed()).await.unwrap();
        drop(feed);

        let end = tokio::time::timeout(WAIT, lots.changed()).await.unwrap();
        assert!(end.is_none());
    }
}
