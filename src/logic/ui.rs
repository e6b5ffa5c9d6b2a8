//! UI state transition logic
//!
//! Pure functions for UI state cycling and transitions.

use crate::Tab;

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 3000;

/// Cycle to the next tab: Currency → Distance → Weight → Volume → Currency
///
/// # Examples
/// ```
/// use balibuddy::Tab;
/// use balibuddy::logic::ui::next_tab;
///
/// assert_eq!(next_tab(Tab::Currency), Tab::Distance);
/// assert_eq!(next_tab(Tab::Volume), Tab::Currency);
/// ```
pub fn next_tab(current: Tab) -> Tab {
    match current {
        Tab::Currency => Tab::Distance,
        Tab::Distance => Tab::Weight,
        Tab::Weight => Tab::Volume,
        Tab::Volume => Tab::Currency,
    }
}

/// Cycle to the previous tab (reverse of `next_tab`)
pub fn previous_tab(current: Tab) -> Tab {
    match current {
        Tab::Currency => Tab::Volume,
        Tab::Distance => Tab::Currency,
        Tab::Weight => Tab::Distance,
        Tab::Volume => Tab::Weight,
    }
}

/// Whether a toast shown `elapsed_ms` ago should go away
pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= TOAST_DURATION_MS
}
