//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models:
//!
//! - **ConvertersModel**: One synchronized field pair per tab
//! - **RateModel**: Snapshot of the exchange rate service for rendering
//! - **UiModel**: Active tab, focus, toast
//!
//! Key principles:
//! - Clone + Debug: Can snapshot state
//! - No services: All I/O lives in the runtime
//! - Pure accessors: Helper methods are side-effect free

pub mod converters;
pub mod rate;
pub mod ui;

pub use converters::ConvertersModel;
pub use rate::RateModel;
pub use ui::UiModel;

use crate::logic::convert::ConversionFactor;
use crate::logic::field_sync::{EditOutcome, FieldPair, InvalidInputPolicy};
use crate::Tab;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub converters: ConvertersModel,
    pub rate: RateModel,
    pub ui: UiModel,
}

impl Model {
    pub fn new(default_tab: Tab, policy: InvalidInputPolicy) -> Self {
        Self {
            converters: ConvertersModel::new(policy),
            rate: RateModel::default(),
            ui: UiModel::new(default_tab),
        }
    }

    /// Field pair of the tab on screen
    pub fn active_pair(&self) -> &FieldPair {
        self.converters.pair(self.ui.active_tab)
    }

    pub fn active_pair_mut(&mut self) -> &mut FieldPair {
        self.converters.pair_mut(self.ui.active_tab)
    }

    /// Take a fresh rate snapshot and hand its rate to the currency pair
    ///
    /// A missing or unusable rate leaves the pair waiting for one.
    pub fn apply_rate(&mut self, rate: RateModel) -> EditOutcome {
        let factor = rate.rate.and_then(|r| ConversionFactor::new(r).ok());
        self.rate = rate;
        self.converters.currency.set_factor(factor)
    }

    pub fn show_toast(&mut self, message: String) {
        self.ui.show_toast(message);
    }

    pub fn should_dismiss_toast(&self) -> bool {
        self.ui.should_dismiss_toast()
    }
}
