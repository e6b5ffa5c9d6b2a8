//! Exchange Rate Handler
//!
//! Turns service notices into toasts and copies the service state into the
//! model so rendering never touches the service directly.

use tracing::debug;

use balibuddy::model::RateModel;
use balibuddy::services::RateNotice;

use crate::App;

pub fn handle_rate_notice(app: &mut App, notice: RateNotice) {
    debug!("rate notice: {:?}", notice);
    app.model.show_toast(notice.toast_message());
}

/// Refresh the rate snapshot and hand the current rate to the currency pair
pub fn sync_rate_model(app: &mut App) {
    let snapshot = RateModel {
        rate: app.rates.rate(),
        last_updated: app.rates.record().map(|record| record.last_updated),
        loading: app.rates.is_loading(),
        online: app.rates.is_online(),
    };
    app.model.apply_rate(snapshot);
}

/// Manual refresh from the keyboard
pub fn request_refresh(app: &mut App) {
    if let Some(notice) = app.rates.refresh() {
        handle_rate_notice(app, notice);
    }
    sync_rate_model(app);
}
