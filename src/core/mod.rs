//! Core business logic: data abstractions, formulas and the calculator

pub mod calculator;
pub mod config;
pub mod data;
pub mod error;
pub mod log;
pub mod models;
pub mod stats;

// Re-export main types for cleaner imports
pub use calculator::PricingModelCalculator;
pub use data::{DataRequest, MarketDataProvider};
pub use error::{ModelError, ModelResult};
pub use models::OptionType;
