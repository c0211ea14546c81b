//! Pure sizing stages: consumption adjustment, demand estimation, unit counts
//! and cheapest-option selection.

/// Tariff allowance and daily consumption adjustment.
pub mod consumption;
pub mod count;
/// Photovoltaic power demand model.
pub mod demand;
pub mod selection;
pub mod types;

pub use consumption::{FeedType, adjust};
pub use count::count_units;
pub use demand::estimate_power;
pub use selection::{Selection, select_cheapest};
pub use types::{PanelOption, SizingResult};

/// Rounds `value` to `decimals` places, half away from zero.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
