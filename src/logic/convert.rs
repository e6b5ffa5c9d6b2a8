//! Fixed-ratio unit conversion
//!
//! Pure functions that turn the text of one field into the text of its
//! paired field. Nothing here holds state: the same input always produces
//! the same output.

use thiserror::Error;

/// Errors raised while converting a field value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("'{0}' is not a number")]
    InvalidInput(String),

    #[error("conversion factor {0} must be positive and finite")]
    InvalidFactor(f64),

    #[error("'{0}' is too large to convert")]
    Overflow(String),
}

/// Positive multiplier relating unit A to unit B (`b = a * factor`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionFactor(f64);

impl ConversionFactor {
    pub const MILES_TO_KILOMETERS: ConversionFactor = ConversionFactor(1.60934);
    pub const POUNDS_TO_KILOGRAMS: ConversionFactor = ConversionFactor(0.453592);
    pub const MILLILITERS_TO_OUNCES: ConversionFactor = ConversionFactor(0.033814);

    pub fn new(value: f64) -> Result<Self, ConvertError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ConvertError::InvalidFactor(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Which way a value travels through the factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// A → B, multiply by the factor
    Forward,
    /// B → A, divide by the factor
    Inverse,
}

/// One side of a unit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub name: &'static str,
    pub symbol: &'static str,
    /// Fractional digits shown when this unit is the derived side
    pub decimals: usize,
}

/// Two units related by a conversion factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPair {
    pub a: Unit,
    pub b: Unit,
}

pub const DISTANCE: UnitPair = UnitPair {
    a: Unit { name: "Miles", symbol: "mi", decimals: 2 },
    b: Unit { name: "Kilometers", symbol: "km", decimals: 2 },
};

pub const WEIGHT: UnitPair = UnitPair {
    a: Unit { name: "Pounds", symbol: "lbs", decimals: 2 },
    b: Unit { name: "Kilograms", symbol: "kg", decimals: 2 },
};

pub const VOLUME: UnitPair = UnitPair {
    a: Unit { name: "Milliliters", symbol: "ml", decimals: 2 },
    b: Unit { name: "Ounces", symbol: "oz", decimals: 2 },
};

/// Currency pair: the factor is the IDR-per-USD rate, rupiah shown as whole units
pub const CURRENCY: UnitPair = UnitPair {
    a: Unit { name: "US Dollars", symbol: "USD", decimals: 2 },
    b: Unit { name: "Indonesian Rupiah", symbol: "IDR", decimals: 0 },
};

/// Parse a field's text into a number
///
/// Returns `Ok(None)` for an empty (or whitespace-only) field.
/// Infinite and NaN spellings are rejected like any other non-number.
pub fn parse_amount(value: &str) -> Result<Option<f64>, ConvertError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(ConvertError::InvalidInput(value.to_string())),
    }
}

/// Convert a field's text through `factor`, formatted to `decimals` places
///
/// An empty input converts to an empty output rather than zero.
///
/// # Examples
/// ```
/// use balibuddy::logic::convert::{convert, ConversionFactor, Direction};
///
/// let km = convert("5", ConversionFactor::MILES_TO_KILOMETERS, Direction::Forward, 2);
/// assert_eq!(km.unwrap(), "8.05");
///
/// let empty = convert("", ConversionFactor::MILES_TO_KILOMETERS, Direction::Forward, 2);
/// assert_eq!(empty.unwrap(), "");
///
/// assert!(convert("abc", ConversionFactor::MILES_TO_KILOMETERS, Direction::Forward, 2).is_err());
/// ```
pub fn convert(
    value: &str,
    factor: ConversionFactor,
    direction: Direction,
    decimals: usize,
) -> Result<String, ConvertError> {
    let Some(amount) = parse_amount(value)? else {
        return Ok(String::new());
    };

    let result = match direction {
        Direction::Forward => amount * factor.value(),
        Direction::Inverse => amount / factor.value(),
    };
    if !result.is_finite() {
        return Err(ConvertError::Overflow(value.to_string()));
    }

    Ok(format!("{:.*}", decimals, result))
}
