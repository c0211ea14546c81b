//! Cheapest-configuration selection.

use crate::catalog::Catalog;
use crate::error::SizingError;

/// Outcome of [`select_cheapest`].
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Catalog index of the cheapest option.
    pub index: usize,
    /// Total installation cost per catalog entry, in catalog order.
    pub total_costs: Vec<f64>,
}

impl Selection {
    /// Total cost of the selected option.
    pub fn selected_cost(&self) -> f64 {
        self.total_costs[self.index]
    }
}

/// Computes `units[i] * unit_price[i]` for every entry and picks the minimum.
///
/// Ties resolve to the lowest index. NaN or infinite totals are never selected.
/// The function holds no state between calls.
///
/// # Errors
///
/// * [`SizingError::LengthMismatch`] if `units` and `catalog` differ in length.
/// * [`SizingError::NoFiniteCost`] if no total is finite.
pub fn select_cheapest(units: &[u32], catalog: &Catalog) -> Result<Selection, SizingError> {
    if units.len() != catalog.len() {
        return Err(SizingError::LengthMismatch {
            units: units.len(),
            catalog: catalog.len(),
        });
    }

    let total_costs: Vec<f64> = units
        .iter()
        .zip(catalog)
        .map(|(&n, panel)| f64::from(n) * panel.unit_price)
        .collect();

    let mut best: Option<usize> = None;
    for (i, &cost) in total_costs.iter().enumerate() {
        if !cost.is_finite() {
            continue;
        }
        if best.is_none_or(|b| cost < total_costs[b]) {
            best = Some(i);
        }
    }
    let index = best.ok_or(SizingError::NoFiniteCost)?;

    Ok(Selection { index, total_costs })
}
