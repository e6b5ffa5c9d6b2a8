//! Event Handlers
//!
//! This module contains handlers for different types of events:
//! - rate: Exchange rate notices and service snapshots
//! - keyboard: User keyboard input
//!
//! Handlers take &mut App and update the model in place.

pub mod keyboard;
pub mod rate;
