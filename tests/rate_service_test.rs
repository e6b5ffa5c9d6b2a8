//! Integration tests for the exchange rate load/refresh protocol
//!
//! A scripted rate source stands in for the network:
//! 1. First load with and without a cached record
//! 2. Fetch failures fall back to the cache
//! 3. Offline behavior, including connectivity flips after start
//! 4. Manual refresh rules (offline, in flight, success, failure)
//! 5. stop() drops late results and the connectivity subscription

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use balibuddy::api::{FetchError, RateSource};
use balibuddy::cache::MemoryStore;
use balibuddy::services::{ExchangeRateService, NetworkMonitor, RateCache, RateNotice};

/// Rate source that replays queued results
struct ScriptedSource {
    results: Mutex<VecDeque<Result<f64, FetchError>>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedSource {
    fn new(results: Vec<Result<f64, FetchError>>) -> Arc<Self> {
        Self::with_delay(results, Duration::ZERO)
    }

    fn with_delay(results: Vec<Result<f64, FetchError>>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateSource for ScriptedSource {
    async fn fetch_rate(&self) -> Result<f64, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.results
            .lock()
            .pop_front()
            .unwrap_or(Err(FetchError::MissingRate("/rates/IDR".to_string())))
    }
}

fn server_error() -> FetchError {
    FetchError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
}

fn cache_with(rate: Option<f64>) -> RateCache<MemoryStore> {
    let mut cache = RateCache::new(MemoryStore::new());
    if let Some(rate) = rate {
        cache.store(rate).unwrap();
    }
    cache
}

fn service(
    cached: Option<f64>,
    source: &Arc<ScriptedSource>,
    monitor: &NetworkMonitor,
) -> ExchangeRateService<MemoryStore> {
    ExchangeRateService::new(
        cache_with(cached),
        source.clone(),
        Arc::new(monitor.clone()),
    )
}

/// Test: First load with nothing cached stores the rate and announces it
#[tokio::test]
async fn test_first_load_announces_rate() {
    let source = ScriptedSource::new(vec![Ok(16500.0)]);
    let monitor = NetworkMonitor::new(true);
    let mut svc = service(None, &source, &monitor);

    assert_eq!(svc.start(), None);
    assert!(svc.is_loading());

    let notices = svc.settle().await;
    assert_eq!(notices, vec![RateNotice::Updated { rate: 16500.0 }]);
    assert_eq!(svc.rate(), Some(16500.0));
    assert!(!svc.is_loading());
    assert_eq!(svc.cache_mut().get_cached().unwrap().rate, 16500.0);
    assert_eq!(source.calls(), 1);
}

/// Test: Cached rate shows immediately; an identical fetch stays quiet
#[tokio::test]
async fn test_cached_same_rate_is_silent() {
    let source = ScriptedSource::new(vec![Ok(16500.0)]);
    let monitor = NetworkMonitor::new(true);
    let mut svc = service(Some(16500.0), &source, &monitor);

    svc.start();
    assert_eq!(svc.rate(), Some(16500.0), "cached rate visible before fetch");

    let notices = svc.settle().await;
    assert!(notices.is_empty());
    assert_eq!(svc.rate(), Some(16500.0));
}

/// Test: A different fetched rate replaces the cached one and is announced
#[tokio::test]
async fn test_cached_different_rate_is_announced() {
    let source = ScriptedSource::new(vec![Ok(16750.0)]);
    let monitor = NetworkMonitor::new(true);
    let mut svc = service(Some(16500.0), &source, &monitor);

    svc.start();
    let notices = svc.settle().await;
    assert_eq!(notices, vec![RateNotice::Updated { rate: 16750.0 }]);
    assert_eq!(svc.cache_mut().get_cached().unwrap().rate, 16750.0);
}

/// Test: Failure with a cached rate keeps it and says nothing
#[tokio::test]
async fn test_failure_with_cache_is_silent() {
    let source = ScriptedSource::new(vec![Err(server_error())]);
    let monitor = NetworkMonitor::new(true);
    let mut svc = service(Some(16500.0), &source, &monitor);

    svc.start();
    let notices = svc.settle().await;
    assert!(notices.is_empty());
    assert_eq!(svc.rate(), Some(16500.0));
}

/// Test: Failure with nothing cached reports the error
#[tokio::test]
async fn test_failure_without_cache_reports() {
    let source = ScriptedSource::new(vec![Err(server_error())]);
    let monitor = NetworkMonitor::new(true);
    let mut svc = service(None, &source, &monitor);

    svc.start();
    let notices = svc.settle().await;
    assert_eq!(notices.len(), 1);
    assert!(matches!(notices[0], RateNotice::FetchFailed { .. }));
    assert!(notices[0].is_error());
    assert_eq!(svc.rate(), None);
}

/// Test: A non-positive rate from the source is treated as a failure
#[tokio::test]
async fn test_invalid_rate_is_a_failure() {
    let source = ScriptedSource::new(vec![Ok(0.0)]);
    let monitor = NetworkMonitor::new(true);
    let mut svc = service(Some(16500.0), &source, &monitor);

    svc.start();
    assert!(svc.settle().await.is_empty());
    assert_eq!(svc.cache_mut().get_cached().unwrap().rate, 16500.0);
}

/// Test: Offline with a cached rate uses it without fetching
#[tokio::test]
async fn test_offline_with_cache() {
    let source = ScriptedSource::new(vec![Ok(17000.0)]);
    let monitor = NetworkMonitor::new(false);
    let mut svc = service(Some(16500.0), &source, &monitor);

    assert_eq!(svc.start(), None);
    assert_eq!(svc.rate(), Some(16500.0));
    assert!(svc.settle().await.is_empty());
    assert_eq!(source.calls(), 0);
}

/// Test: Offline with nothing cached reports that no rate is available
#[tokio::test]
async fn test_offline_without_cache() {
    let source = ScriptedSource::new(vec![]);
    let monitor = NetworkMonitor::new(false);
    let mut svc = service(None, &source, &monitor);

    assert_eq!(svc.start(), Some(RateNotice::NoRateOffline));
    assert_eq!(svc.rate(), None);
    assert_eq!(source.calls(), 0);
}

/// Test: After going offline, refresh does not touch the source
#[tokio::test]
async fn test_refresh_after_going_offline() {
    let source = ScriptedSource::new(vec![Ok(16500.0)]);
    let monitor = NetworkMonitor::new(true);
    let mut svc = service(None, &source, &monitor);

    svc.start();
    svc.settle().await;
    assert_eq!(source.calls(), 1);

    monitor.set_online(false);
    assert_eq!(svc.refresh(), Some(RateNotice::RefreshOffline));
    assert!(!svc.is_online());
    assert!(!svc.can_refresh());
    assert_eq!(source.calls(), 1);
}

/// Test: Manual refresh success always reports, even when unchanged
#[tokio::test]
async fn test_refresh_success_reports() {
    let source = ScriptedSource::new(vec![Ok(16500.0), Ok(16500.0)]);
    let monitor = NetworkMonitor::new(true);
    let mut svc = service(None, &source, &monitor);

    svc.start();
    svc.settle().await;

    assert_eq!(svc.refresh(), None);
    assert!(svc.is_loading());
    let notices = svc.settle().await;
    assert_eq!(notices, vec![RateNotice::Refreshed { rate: 16500.0 }]);
    assert_eq!(source.calls(), 2);
}

/// Test: Manual refresh failure reports and keeps the previous rate
#[tokio::test]
async fn test_refresh_failure_keeps_rate() {
    let source = ScriptedSource::new(vec![Ok(16500.0), Err(server_error())]);
    let monitor = NetworkMonitor::new(true);
    let mut svc = service(None, &source, &monitor);

    svc.start();
    svc.settle().await;

    svc.refresh();
    let notices = svc.settle().await;
    assert_eq!(notices.len(), 1);
    match &notices[0] {
        RateNotice::FetchFailed { message } => {
            assert_eq!(message, "the rate service had an internal error")
        }
        other => panic!("expected FetchFailed, got {:?}", other),
    }
    assert_eq!(svc.rate(), Some(16500.0));
}

/// Test: A second refresh while one is in flight is ignored
#[tokio::test]
async fn test_refresh_ignored_while_in_flight() {
    let source =
        ScriptedSource::with_delay(vec![Ok(16500.0), Ok(16600.0)], Duration::from_millis(50));
    let monitor = NetworkMonitor::new(true);
    let mut svc = service(Some(16400.0), &source, &monitor);

    svc.start();
    assert!(!svc.can_refresh());
    assert_eq!(svc.refresh(), None);

    let notices = svc.settle().await;
    assert_eq!(notices, vec![RateNotice::Updated { rate: 16500.0 }]);
    assert_eq!(source.calls(), 1);
    assert!(svc.can_refresh());
}

/// Test: stop() discards a late result and releases the subscription
#[tokio::test]
async fn test_stop_discards_late_result() {
    let source = ScriptedSource::with_delay(vec![Ok(16750.0)], Duration::from_millis(50));
    let monitor = NetworkMonitor::new(true);
    let mut svc = service(Some(16500.0), &source, &monitor);

    svc.start();
    assert_eq!(monitor.subscriber_count(), 1);

    svc.stop();
    assert!(!svc.is_loading());
    assert_eq!(monitor.subscriber_count(), 0);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(svc.poll().is_empty());
    assert_eq!(svc.rate(), Some(16500.0));
    assert_eq!(svc.cache_mut().get_cached().unwrap().rate, 16500.0);
}

/// Test: Coming back online enables refresh again
#[tokio::test]
async fn test_became_online_enables_refresh() {
    let source = ScriptedSource::new(vec![Ok(16500.0)]);
    let monitor = NetworkMonitor::new(false);
    let mut svc = service(Some(16400.0), &source, &monitor);

    svc.start();
    assert!(!svc.can_refresh());

    monitor.set_online(true);
    assert!(svc.poll().is_empty());
    assert!(svc.is_online());
    assert!(svc.can_refresh());

    assert_eq!(svc.refresh(), None);
    let notices = svc.settle().await;
    assert_eq!(notices, vec![RateNotice::Refreshed { rate: 16500.0 }]);
}
