//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - convert: Fixed-ratio unit conversion and the unit catalog
//! - errors: Fetch error classification and root-cause formatting
//! - field_sync: Two-field synchronization state machine
//! - formatting: Rate and timestamp display text
//! - ui: Tab cycling and toast timing

pub mod convert;
pub mod errors;
pub mod field_sync;
pub mod formatting;
pub mod ui;
