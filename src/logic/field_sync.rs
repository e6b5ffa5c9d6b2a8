//! Two-field synchronization
//!
//! A `FieldPair` holds the text of two linked inputs. Whichever field the user
//! edited last is authoritative; the other one is only ever written here,
//! recomputed from the authoritative text after every edit.
//!
//! ```text
//!             edit(A)                    edit(B)
//! Neutral ───────────▶ AEditing ◀──────▶ BEditing ◀─────────── Neutral
//!                      (A drives B)      (B drives A)
//! ```

use serde::Deserialize;
use tracing::debug;

use super::convert::{convert, ConversionFactor, Direction, UnitPair};

/// Text written into the derived field in `Marker` mode
pub const INVALID_INPUT_MARKER: &str = "Invalid input";

/// One of the two linked fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    A,
    B,
}

impl Field {
    pub fn other(self) -> Field {
        match self {
            Field::A => Field::B,
            Field::B => Field::A,
        }
    }
}

/// Which field currently drives the other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Neutral,
    AEditing,
    BEditing,
}

impl EditState {
    fn editing(field: Field) -> Self {
        match field {
            Field::A => EditState::AEditing,
            Field::B => EditState::BEditing,
        }
    }

    /// The authoritative field, if any
    pub fn driver(self) -> Option<Field> {
        match self {
            EditState::Neutral => None,
            EditState::AEditing => Some(Field::A),
            EditState::BEditing => Some(Field::B),
        }
    }
}

/// What happens to the derived field when the authoritative text is not a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidInputPolicy {
    /// Keep whatever the derived field showed before
    #[default]
    LeaveUnchanged,
    /// Replace the derived field with `INVALID_INPUT_MARKER`
    Marker,
}

/// Result of a recomputation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// No field is authoritative yet
    Idle,
    /// Derived field now holds the converted value
    Derived,
    /// Authoritative field is empty, so both are
    Cleared,
    /// Authoritative text is not a number
    Invalid,
    /// No factor available (currency before any rate is known)
    AwaitingFactor,
}

#[derive(Debug, Clone)]
pub struct FieldPair {
    units: UnitPair,
    factor: Option<ConversionFactor>,
    policy: InvalidInputPolicy,
    a: String,
    b: String,
    state: EditState,
}

impl FieldPair {
    pub fn new(units: UnitPair, factor: Option<ConversionFactor>, policy: InvalidInputPolicy) -> Self {
        Self {
            units,
            factor,
            policy,
            a: String::new(),
            b: String::new(),
            state: EditState::Neutral,
        }
    }

    pub fn units(&self) -> UnitPair {
        self.units
    }

    pub fn factor(&self) -> Option<ConversionFactor> {
        self.factor
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::A => &self.a,
            Field::B => &self.b,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::A => &mut self.a,
            Field::B => &mut self.b,
        }
    }

    /// Replace the text of `field` as the user typed it, making it authoritative
    pub fn edit(&mut self, field: Field, text: impl Into<String>) -> EditOutcome {
        *self.value_mut(field) = text.into();
        self.state = EditState::editing(field);
        self.recompute()
    }

    pub fn push_char(&mut self, field: Field, ch: char) -> EditOutcome {
        let mut text = self.value(field).to_string();
        text.push(ch);
        self.edit(field, text)
    }

    pub fn pop_char(&mut self, field: Field) -> EditOutcome {
        let mut text = self.value(field).to_string();
        text.pop();
        self.edit(field, text)
    }

    pub fn clear_field(&mut self, field: Field) -> EditOutcome {
        self.edit(field, String::new())
    }

    /// Swap in a new factor and rederive from the authoritative field
    pub fn set_factor(&mut self, factor: Option<ConversionFactor>) -> EditOutcome {
        if self.factor == factor {
            return EditOutcome::Idle;
        }
        debug!(
            "factor for {}/{} changed from {:?} to {:?}",
            self.units.a.symbol, self.units.b.symbol, self.factor, factor
        );
        self.factor = factor;
        self.recompute()
    }

    fn recompute(&mut self) -> EditOutcome {
        let Some(driver) = self.state.driver() else {
            return EditOutcome::Idle;
        };
        let derived = driver.other();
        let source = self.value(driver).to_string();

        let Some(factor) = self.factor else {
            if source.trim().is_empty() {
                self.value_mut(derived).clear();
                return EditOutcome::Cleared;
            }
            return EditOutcome::AwaitingFactor;
        };

        let (direction, decimals) = match driver {
            Field::A => (Direction::Forward, self.units.b.decimals),
            Field::B => (Direction::Inverse, self.units.a.decimals),
        };

        match convert(&source, factor, direction, decimals) {
            Ok(result) => {
                let outcome = if result.is_empty() {
                    EditOutcome::Cleared
                } else {
                    EditOutcome::Derived
                };
                *self.value_mut(derived) = result;
                outcome
            }
            Err(_) => {
                if self.policy == InvalidInputPolicy::Marker {
                    *self.value_mut(derived) = INVALID_INPUT_MARKER.to_string();
                }
                EditOutcome::Invalid
            }
        }
    }
}
