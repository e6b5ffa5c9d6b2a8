//! Formatting and display logic
//!
//! Pure functions for formatting rate data for human-readable display.

use chrono::{DateTime, Local, Utc};

/// Format a rate with two decimals
///
/// # Examples
/// ```
/// use balibuddy::logic::formatting::format_rate;
///
/// assert_eq!(format_rate(16500.0), "16500.00");
/// assert_eq!(format_rate(16321.5), "16321.50");
/// ```
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}", rate)
}

/// Text of the "Current Rate (1 USD)" line
///
/// Shows the rate when known, `Loading...` while the first fetch is running,
/// otherwise `N/A`.
pub fn rate_status_line(rate: Option<f64>, loading: bool) -> String {
    let value = match rate {
        Some(rate) => format!("Rp {}", format_rate(rate)),
        None if loading => "Loading...".to_string(),
        None => "N/A".to_string(),
    };
    format!("Current Rate (1 USD): {}", value)
}

/// Text of the "Last Updated" line, in local time
pub fn last_updated_line(last_updated: Option<&DateTime<Utc>>, loading: bool) -> String {
    let value = match last_updated {
        Some(stamp) => stamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None if loading => "Loading...".to_string(),
        None => "N/A".to_string(),
    };
    format!("Last Updated: {}", value)
}

/// Label of the refresh control
pub fn refresh_label(loading: bool, online: bool) -> &'static str {
    if loading {
        "Refreshing..."
    } else if !online {
        "Refresh Rate (offline)"
    } else {
        "Refresh Rate"
    }
}
