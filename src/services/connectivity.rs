//! Online/offline signal
//!
//! `NetworkMonitor` keeps one shared boolean and fans change events out to
//! subscribers. A background probe flips it by checking whether the rate
//! host accepts TCP connections.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Url;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    BecameOnline,
    BecameOffline,
}

/// Source of connectivity state
///
/// Dropping the receiver returned by `subscribe` unsubscribes.
pub trait ConnectivityMonitor: Send + Sync {
    fn is_online(&self) -> bool;
    fn subscribe(&self) -> mpsc::UnboundedReceiver<ConnectivityEvent>;
}

struct MonitorState {
    online: bool,
    subscribers: Vec<mpsc::UnboundedSender<ConnectivityEvent>>,
}

#[derive(Clone)]
pub struct NetworkMonitor {
    state: Arc<Mutex<MonitorState>>,
}

impl NetworkMonitor {
    pub fn new(online: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(MonitorState {
                online,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Record the current state, notifying subscribers only on change
    pub fn set_online(&self, online: bool) {
        let mut state = self.state.lock();
        if state.online == online {
            return;
        }
        state.online = online;

        let event = if online {
            ConnectivityEvent::BecameOnline
        } else {
            ConnectivityEvent::BecameOffline
        };
        info!("connectivity changed: {:?}", event);

        state.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        let mut state = self.state.lock();
        state.subscribers.retain(|tx| !tx.is_closed());
        state.subscribers.len()
    }

    /// Periodically probe `host:port` and feed the result into `set_online`
    pub fn spawn_probe(
        &self,
        host: String,
        port: u16,
        every: Duration,
        timeout: Duration,
    ) -> JoinHandle<()> {
        let monitor = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let reachable = probe(&host, port, timeout).await;
                debug!("probe {}:{} reachable={}", host, port, reachable);
                monitor.set_online(reachable);
            }
        })
    }
}

impl ConnectivityMonitor for NetworkMonitor {
    fn is_online(&self) -> bool {
        self.state.lock().online
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<ConnectivityEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state.lock().subscribers.push(tx);
        rx
    }
}

/// Whether `host:port` accepts a TCP connection within `timeout`
pub async fn probe(host: &str, port: u16, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect((host, port))).await,
        Ok(Ok(_))
    )
}

/// Host and port to probe for a rate URL
pub fn probe_target(url: &str) -> Option<(String, u16)> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_string();
    let port = parsed.port_or_known_default()?;
    Some((host, port))
}
