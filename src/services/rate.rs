//! Exchange rate service
//!
//! Owns the cached record, the remote source and the connectivity
//! subscription for the currency tab. Fetches run as spawned tasks; their
//! results come back over a channel that the UI loop drains with `poll`.
//!
//! Load protocol (`start`):
//! 1. Show the cached record right away, if there is one.
//! 2. If online, fetch in the background. Success replaces and persists the
//!    rate (notify on first load or when it changed). Failure keeps the cached
//!    rate (notify only when nothing was cached).
//! 3. Offline with nothing cached: notify that no rate is available.
//!
//! Manual refresh (`refresh`) behaves like step 2 but always notifies, and is
//! refused while offline or while another fetch is in flight.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{validate_rate, FetchError, RateSource};
use crate::cache::KeyValueStore;
use crate::logic::errors::{classify_error, describe, format_error_message};
use crate::logic::formatting::format_rate;

use super::connectivity::{ConnectivityEvent, ConnectivityMonitor};
use super::rate_cache::{ExchangeRateRecord, RateCache};

/// Rates closer than this are treated as unchanged
const RATE_CHANGE_EPSILON: f64 = 1e-6;

/// User-facing outcome of a load or refresh
#[derive(Debug, Clone, PartialEq)]
pub enum RateNotice {
    /// First load, or the fetched rate differs from the cached one
    Updated { rate: f64 },
    /// Manual refresh succeeded
    Refreshed { rate: f64 },
    /// Fetch failed and the user needs to know
    FetchFailed { message: String },
    /// Offline and nothing cached
    NoRateOffline,
    /// Manual refresh attempted while offline
    RefreshOffline,
}

impl RateNotice {
    pub fn title(&self) -> &'static str {
        match self {
            RateNotice::Updated { .. } => "Exchange rate updated",
            RateNotice::Refreshed { .. } => "Exchange rate refreshed!",
            RateNotice::FetchFailed { .. } => "Error fetching rate",
            RateNotice::NoRateOffline | RateNotice::RefreshOffline => "Offline",
        }
    }

    pub fn description(&self) -> String {
        match self {
            RateNotice::Updated { rate } => format!("IDR to USD rate: {}", format_rate(*rate)),
            RateNotice::Refreshed { rate } => format!("New IDR to USD rate: {}", format_rate(*rate)),
            RateNotice::FetchFailed { message } => format!(
                "Could not fetch new exchange rate ({}). Using stored rate if available.",
                message
            ),
            RateNotice::NoRateOffline => {
                "No internet connection and no stored exchange rate available.".to_string()
            }
            RateNotice::RefreshOffline => "Cannot refresh rate. No internet connection.".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            RateNotice::FetchFailed { .. } | RateNotice::NoRateOffline | RateNotice::RefreshOffline
        )
    }

    /// One-line toast text; errors carry the `Error:` prefix the toast renderer keys on
    pub fn toast_message(&self) -> String {
        if self.is_error() {
            format!("Error: {} - {}", self.title(), self.description())
        } else {
            format!("{} - {}", self.title(), self.description())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FetchKind {
    Initial { cached_rate: Option<f64> },
    Refresh,
}

struct FetchCompletion {
    kind: FetchKind,
    result: Result<f64, FetchError>,
}

pub struct ExchangeRateService<S> {
    cache: RateCache<S>,
    source: Arc<dyn RateSource>,
    monitor: Arc<dyn ConnectivityMonitor>,
    subscription: Option<mpsc::UnboundedReceiver<ConnectivityEvent>>,
    online: bool,
    current: Option<ExchangeRateRecord>,
    in_flight: Option<FetchKind>,
    results_tx: mpsc::UnboundedSender<FetchCompletion>,
    results_rx: mpsc::UnboundedReceiver<FetchCompletion>,
}

impl<S: KeyValueStore> ExchangeRateService<S> {
    pub fn new(
        cache: RateCache<S>,
        source: Arc<dyn RateSource>,
        monitor: Arc<dyn ConnectivityMonitor>,
    ) -> Self {
        let online = monitor.is_online();
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            cache,
            source,
            monitor,
            subscription: None,
            online,
            current: None,
            in_flight: None,
            results_tx,
            results_rx,
        }
    }

    /// Subscribe to connectivity, show the cached rate and start the initial fetch
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Option<RateNotice> {
        if self.subscription.is_none() {
            self.subscription = Some(self.monitor.subscribe());
        }
        self.online = self.monitor.is_online();

        let cached = self.cache.get_cached();
        if self.current.is_none() {
            self.current = cached.clone();
        }

        if self.online {
            self.spawn_fetch(FetchKind::Initial {
                cached_rate: cached.map(|record| record.rate),
            });
            None
        } else if cached.is_none() {
            info!("offline with no cached exchange rate");
            Some(RateNotice::NoRateOffline)
        } else {
            debug!("offline, using cached exchange rate");
            None
        }
    }

    /// Unsubscribe from connectivity and drop any in-flight result
    pub fn stop(&mut self) {
        self.subscription = None;
        if self.in_flight.take().is_some() {
            debug!("discarding in-flight exchange rate fetch");
        }

        // The old sender lives on in the spawned task; its send fails silently
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        self.results_tx = results_tx;
        self.results_rx = results_rx;
    }

    /// Request a manual refresh
    ///
    /// Returns a notice only when the refresh is refused for being offline;
    /// the outcome of an accepted refresh arrives through `poll`/`settle`.
    pub fn refresh(&mut self) -> Option<RateNotice> {
        self.drain_connectivity();

        if !self.online {
            return Some(RateNotice::RefreshOffline);
        }
        if self.in_flight.is_some() {
            debug!("refresh ignored, fetch already in flight");
            return None;
        }

        self.spawn_fetch(FetchKind::Refresh);
        None
    }

    /// Apply connectivity changes and any finished fetch, without blocking
    pub fn poll(&mut self) -> Vec<RateNotice> {
        self.drain_connectivity();

        let mut notices = Vec::new();
        while let Ok(completion) = self.results_rx.try_recv() {
            notices.extend(self.complete(completion));
        }
        notices
    }

    /// Wait for the in-flight fetch (if any) to finish, then `poll`
    pub async fn settle(&mut self) -> Vec<RateNotice> {
        let mut notices = Vec::new();
        if self.in_flight.is_some() {
            if let Some(completion) = self.results_rx.recv().await {
                notices.extend(self.complete(completion));
            }
        }
        notices.extend(self.poll());
        notices
    }

    pub fn rate(&self) -> Option<f64> {
        self.current.as_ref().map(|record| record.rate)
    }

    pub fn record(&self) -> Option<&ExchangeRateRecord> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Whether the refresh control should be enabled
    pub fn can_refresh(&self) -> bool {
        self.online && self.in_flight.is_none()
    }

    pub fn cache_mut(&mut self) -> &mut RateCache<S> {
        &mut self.cache
    }

    fn drain_connectivity(&mut self) {
        let Some(subscription) = self.subscription.as_mut() else {
            return;
        };

        while let Ok(event) = subscription.try_recv() {
            self.online = matches!(event, ConnectivityEvent::BecameOnline);
            debug!("exchange rate service saw {:?}", event);
        }
    }

    fn spawn_fetch(&mut self, kind: FetchKind) {
        debug!("starting exchange rate fetch: {:?}", kind);
        self.in_flight = Some(kind);

        let source = Arc::clone(&self.source);
        let results_tx = self.results_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_rate().await;
            let _ = results_tx.send(FetchCompletion { kind, result });
        });
    }

    fn complete(&mut self, completion: FetchCompletion) -> Option<RateNotice> {
        self.in_flight = None;

        match completion.result.and_then(validate_rate) {
            Ok(rate) => {
                let record = match self.cache.store(rate) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!("exchange rate not persisted: {}", e);
                        ExchangeRateRecord::new(rate).ok()?
                    }
                };
                info!("exchange rate now {}", record.rate);
                self.current = Some(record);

                match completion.kind {
                    FetchKind::Refresh => Some(RateNotice::Refreshed { rate }),
                    FetchKind::Initial { cached_rate } => {
                        let changed = cached_rate
                            .map_or(true, |cached| (cached - rate).abs() > RATE_CHANGE_EPSILON);
                        changed.then_some(RateNotice::Updated { rate })
                    }
                }
            }
            Err(e) => {
                let error_type = classify_error(&e);
                warn!(
                    "exchange rate fetch failed ({:?}): {}",
                    error_type,
                    format_error_message(&e)
                );

                let message = describe(&error_type).to_string();
                match completion.kind {
                    FetchKind::Refresh => Some(RateNotice::FetchFailed { message }),
                    FetchKind::Initial { cached_rate: None } => {
                        Some(RateNotice::FetchFailed { message })
                    }
                    FetchKind::Initial { cached_rate: Some(_) } => None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notices_are_prefixed() {
        let notice = RateNotice::RefreshOffline;
        assert!(notice.is_error());
        assert_eq!(
            notice.toast_message(),
            "Error: Offline - Cannot refresh rate. No internet connection."
        );
    }

    #[test]
    fn test_success_notices_are_not_errors() {
        let notice = RateNotice::Refreshed { rate: 16500.0 };
        assert!(!notice.is_error());
        assert_eq!(
            notice.toast_message(),
            "Exchange rate refreshed! - New IDR to USD rate: 16500.00"
        );
    }

    #[test]
    fn test_updated_notice_text() {
        let notice = RateNotice::Updated { rate: 16321.5 };
        assert_eq!(notice.title(), "Exchange rate updated");
        assert_eq!(notice.description(), "IDR to USD rate: 16321.50");
    }

    #[test]
    fn test_fetch_failed_mentions_cause() {
        let notice = RateNotice::FetchFailed {
            message: "the network is unreachable".to_string(),
        };
        assert!(notice.description().contains("the network is unreachable"));
        assert!(notice.toast_message().starts_with("Error: Error fetching rate"));
    }
}
