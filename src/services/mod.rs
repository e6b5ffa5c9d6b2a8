//! External Services
//!
//! This module contains services that interact with external systems:
//! - connectivity: Online/offline signal and reachability probe
//! - rate: Exchange rate load/refresh protocol
//! - rate_cache: Persisted exchange rate record

pub mod connectivity;
pub mod rate;
pub mod rate_cache;

// Re-export commonly used types for convenience
pub use connectivity::{ConnectivityEvent, ConnectivityMonitor, NetworkMonitor};
pub use rate::{ExchangeRateService, RateNotice};
pub use rate_cache::{ExchangeRateRecord, RateCache};
