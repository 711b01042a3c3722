pub mod metrics;
pub mod setup;
pub mod ui;
