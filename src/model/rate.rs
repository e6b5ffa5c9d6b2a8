//! Rate Model
//!
//! What the currency footer needs to know about the exchange rate service,
//! copied out of it once per frame.

use chrono::{DateTime, Utc};

use crate::logic::formatting;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RateModel {
    /// IDR per USD, if known
    pub rate: Option<f64>,

    /// When `rate` was fetched
    pub last_updated: Option<DateTime<Utc>>,

    /// A fetch is in flight
    pub loading: bool,

    /// Last known connectivity
    pub online: bool,
}

impl RateModel {
    pub fn status_line(&self) -> String {
        formatting::rate_status_line(self.rate, self.loading)
    }

    pub fn last_updated_line(&self) -> String {
        formatting::last_updated_line(self.last_updated.as_ref(), self.loading)
    }

    pub fn refresh_label(&self) -> &'static str {
        formatting::refresh_label(self.loading, self.online)
    }

    pub fn can_refresh(&self) -> bool {
        self.online && !self.loading
    }

    /// Offline but still able to show a saved rate
    pub fn showing_saved_rate_offline(&self) -> bool {
        !self.online && self.rate.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let model = RateModel::default();
        assert_eq!(model.status_line(), "Current Rate (1 USD): N/A");
        assert!(!model.can_refresh());
        assert!(!model.showing_saved_rate_offline());
    }

    #[test]
    fn test_status_line_with_rate() {
        let model = RateModel {
            rate: Some(16500.0),
            online: true,
            ..Default::default()
        };
        assert_eq!(model.status_line(), "Current Rate (1 USD): Rp 16500.00");
        assert!(model.can_refresh());
    }

    #[test]
    fn test_loading_blocks_refresh() {
        let model = RateModel {
            loading: true,
            online: true,
            ..Default::default()
        };
        assert_eq!(model.status_line(), "Current Rate (1 USD): Loading...");
        assert!(!model.can_refresh());
    }

    #[test]
    fn test_offline_with_saved_rate() {
        let model = RateModel {
            rate: Some(16500.0),
            online: false,
            ..Default::default()
        };
        assert!(model.showing_saved_rate_offline());
        assert!(!model.can_refresh());
    }
}
