//! Bali Buddy conversion library
//!
//! Exposes the conversion, synchronization and exchange rate modules for the
//! terminal front end and for testing

pub mod api;
pub mod cache;
pub mod config;
pub mod logic;
pub mod model;
pub mod services;
pub mod utils;

use clap::ValueEnum;
use serde::Deserialize;

/// Converter tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Currency,
    Distance,
    Weight,
    Volume,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Currency, Tab::Distance, Tab::Weight, Tab::Volume];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Currency => "Currency",
            Tab::Distance => "Distance",
            Tab::Weight => "Weight",
            Tab::Volume => "Volume",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Currency => 0,
            Tab::Distance => 1,
            Tab::Weight => 2,
            Tab::Volume => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_names_match_between_cli_and_config() {
        for tab in Tab::ALL {
            let name = tab.as_str().to_lowercase();
            assert_eq!(Tab::from_str(&name, false), Ok(tab));

            let parsed: Tab = serde_yaml::from_str(&name).unwrap();
            assert_eq!(parsed, tab);
        }
    }

    #[test]
    fn test_unknown_tab_name_is_rejected() {
        assert!(Tab::from_str("temperature", true).is_err());
    }
}
