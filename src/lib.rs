//! Photovoltaic installation sizing from household consumption and a panel catalog.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod parameters;
pub mod reporting;
pub mod runner;
pub mod sizing;

pub use catalog::{Catalog, PanelModel};
pub use error::SizingError;
pub use parameters::ConsumptionConfig;
pub use runner::{SizingRun, run, run_sizing};
pub use sizing::{FeedType, PanelOption, SizingResult};
