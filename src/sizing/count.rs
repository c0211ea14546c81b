//! Units required per catalog model.

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::SizingError;

/// Smallest unit count per panel whose combined power meets `demand_kw`.
///
/// Returns one count per catalog entry, in catalog order. Every entry is
/// validated before any count is computed.
///
/// # Errors
///
/// * [`SizingError::InvalidCatalogEntry`] if any panel power is not strictly positive.
/// * [`SizingError::NegativeDemand`] if `demand_kw` is negative or NaN.
/// * [`SizingError::UnitCountOverflow`] if a count does not fit in `u32`.
pub fn count_units(demand_kw: f64, catalog: &Catalog) -> Result<Vec<u32>, SizingError> {
    if demand_kw.is_nan() || demand_kw.is_sign_negative() {
        return Err(SizingError::NegativeDemand { value: demand_kw });
    }

    if let Some((index, panel)) = catalog
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.power_kw.is_finite() && p.power_kw > 0.0))
    {
        return Err(SizingError::InvalidCatalogEntry {
            index,
            name: panel.name.clone(),
            power_kw: panel.power_kw,
        });
    }

    catalog
        .iter()
        .enumerate()
        .map(|(index, panel)| {
            let ratio = (demand_kw / panel.power_kw).ceil();
            if ratio > f64::from(u32::MAX) {
                return Err(SizingError::UnitCountOverflow {
                    index,
                    name: panel.name.clone(),
                    units: ratio,
                });
            }
            let units = ratio as u32;
            debug!(
                "{}: {units} units x {:.3} kW for {demand_kw:.4} kW",
                panel.name, panel.power_kw
            );
            Ok(units)
        })
        .collect()
}
