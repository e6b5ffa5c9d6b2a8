//! Converters Model
//!
//! One synchronized field pair per tab. The fixed-ratio pairs carry their
//! factor from construction; the currency pair waits for an exchange rate.

use crate::logic::convert::{self, ConversionFactor};
use crate::logic::field_sync::{FieldPair, InvalidInputPolicy};
use crate::Tab;

#[derive(Clone, Debug)]
pub struct ConvertersModel {
    pub currency: FieldPair,
    pub distance: FieldPair,
    pub weight: FieldPair,
    pub volume: FieldPair,
}

impl ConvertersModel {
    pub fn new(policy: InvalidInputPolicy) -> Self {
        Self {
            currency: FieldPair::new(convert::CURRENCY, None, policy),
            distance: FieldPair::new(
                convert::DISTANCE,
                Some(ConversionFactor::MILES_TO_KILOMETERS),
                policy,
            ),
            weight: FieldPair::new(
                convert::WEIGHT,
                Some(ConversionFactor::POUNDS_TO_KILOGRAMS),
                policy,
            ),
            volume: FieldPair::new(
                convert::VOLUME,
                Some(ConversionFactor::MILLILITERS_TO_OUNCES),
                policy,
            ),
        }
    }

    pub fn pair(&self, tab: Tab) -> &FieldPair {
        match tab {
            Tab::Currency => &self.currency,
            Tab::Distance => &self.distance,
            Tab::Weight => &self.weight,
            Tab::Volume => &self.volume,
        }
    }

    pub fn pair_mut(&mut self, tab: Tab) -> &mut FieldPair {
        match tab {
            Tab::Currency => &mut self.currency,
            Tab::Distance => &mut self.distance,
            Tab::Weight => &mut self.weight,
            Tab::Volume => &mut self.volume,
        }
    }
}
