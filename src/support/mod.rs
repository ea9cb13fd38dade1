//! Scenario support: configuration, logging, test data and driver fixtures.

pub mod data_reader;
pub mod fixture;
pub mod logger;
pub mod settings;

pub use settings::Settings;
