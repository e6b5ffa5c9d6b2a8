//! Exchange rate persistence
//!
//! Exactly one record lives in the store, under a fixed key. Writes replace
//! the whole record; a record that can't be decoded is purged on read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{CacheError, KeyValueStore};

pub const EXCHANGE_RATE_KEY: &str = "balibuddy.exchange_rate.idr_per_usd";

/// IDR-per-USD rate and when it was fetched
///
/// Serialized as `{"rate": 16500.0, "lastUpdated": "2026-10-16T08:30:00Z"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateRecord {
    pub rate: f64,
    pub last_updated: DateTime<Utc>,
}

impl ExchangeRateRecord {
    /// Stamp `rate` with the current time
    pub fn new(rate: f64) -> Result<Self, CacheError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(CacheError::InvalidRate(rate));
        }

        Ok(Self {
            rate,
            last_updated: Utc::now(),
        })
    }

    fn decode(raw: &str) -> Result<Self, CacheError> {
        let record: ExchangeRateRecord =
            serde_json::from_str(raw).map_err(|e| CacheError::Corrupt(e.to_string()))?;

        if !(record.rate.is_finite() && record.rate > 0.0) {
            return Err(CacheError::Corrupt(format!("stored rate {} is not positive", record.rate)));
        }

        Ok(record)
    }
}

pub struct RateCache<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> RateCache<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, EXCHANGE_RATE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// Last persisted record, or `None` if absent or corrupt
    ///
    /// A corrupt entry is removed so the next read also sees nothing.
    pub fn get_cached(&mut self) -> Option<ExchangeRateRecord> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("failed to read cached exchange rate: {}", e);
                return None;
            }
        };

        match ExchangeRateRecord::decode(&raw) {
            Ok(record) => {
                debug!("cached exchange rate {} from {}", record.rate, record.last_updated);
                Some(record)
            }
            Err(e) => {
                warn!("discarding cached exchange rate: {}", e);
                if let Err(e) = self.store.remove(&self.key) {
                    warn!("failed to purge corrupt exchange rate: {}", e);
                }
                None
            }
        }
    }

    /// Persist `rate` with the current timestamp, replacing any prior record
    pub fn store(&mut self, rate: f64) -> Result<ExchangeRateRecord, CacheError> {
        let record = ExchangeRateRecord::new(rate)?;
        let raw = serde_json::to_string(&record)?;
        self.store.set(&self.key, &raw)?;

        debug!("stored exchange rate {}", record.rate);
        Ok(record)
    }

    /// Drop the stored record
    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.store.remove(&self.key)
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    pub fn into_backend(self) -> S {
        self.store
    }
}
