//! Result types produced by a sizing run.

use std::fmt;

use serde::Serialize;

use super::round_to;
use super::selection::Selection;
use crate::catalog::Catalog;

/// One catalog entry evaluated against the demand.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelOption {
    /// Position in the catalog.
    pub index: usize,
    pub name: String,
    /// Nameplate power per unit (kW).
    pub power_kw: f64,
    pub unit_price: f64,
    /// Units needed to meet demand.
    pub units: u32,
    /// `units * unit_price`.
    pub total_cost: f64,
}

impl PanelOption {
    /// Builds the per-entry breakdown from catalog, counts and selection totals.
    ///
    /// All three inputs are expected to be the same length and in catalog order.
    pub fn tabulate(catalog: &Catalog, units: &[u32], selection: &Selection) -> Vec<Self> {
        catalog
            .iter()
            .zip(units)
            .zip(&selection.total_costs)
            .enumerate()
            .map(|(index, ((panel, &units), &total_cost))| Self {
                index,
                name: panel.name.clone(),
                power_kw: panel.power_kw,
                unit_price: panel.unit_price,
                units,
                total_cost,
            })
            .collect()
    }

    /// Installed capacity if this option were chosen (kW).
    pub fn capacity_kw(&self) -> f64 {
        f64::from(self.units) * self.power_kw
    }
}

impl fmt::Display for PanelOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} x {:.3} kW = {:.3} kW, cost {:.2}",
            self.index,
            self.name,
            self.units,
            self.power_kw,
            self.capacity_kw(),
            self.total_cost
        )
    }
}

/// Selected configuration, as persisted under the result section.
///
/// Field names in the serialized form follow the parameter document's
/// existing vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingResult {
    /// Catalog index of the selected panel.
    #[serde(skip)]
    pub selected_index: usize,
    #[serde(rename = "painel_selecionado")]
    pub panel_name: String,
    #[serde(rename = "qtd_paineis_necessarios")]
    pub units_required: u32,
    /// Installed capacity (kW, 2 decimals).
    #[serde(rename = "capacidade_total")]
    pub installed_capacity_kw: f64,
    /// Installation price, unrounded.
    #[serde(rename = "preco_instalacao")]
    pub total_cost: f64,
    /// Computed demand (kW, 4 decimals).
    #[serde(rename = "demanda")]
    pub demand_kw: f64,
}

impl SizingResult {
    /// Assembles the reportable result for the selected option.
    ///
    /// # Arguments
    ///
    /// * `option` - The selected entry from [`PanelOption::tabulate`]
    /// * `demand_kw` - Full-precision demand from the estimator
    pub fn from_option(option: &PanelOption, demand_kw: f64) -> Self {
        Self {
            selected_index: option.index,
            panel_name: option.name.clone(),
            units_required: option.units,
            installed_capacity_kw: round_to(option.capacity_kw(), 2),
            total_cost: option.total_cost,
            demand_kw: round_to(demand_kw, 4),
        }
    }
}

impl fmt::Display for SizingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Sizing Result ---")?;
        writeln!(f, "Selected panel:      {}", self.panel_name)?;
        writeln!(f, "Panels required:     {}", self.units_required)?;
        writeln!(f, "Installed capacity:  {:.2} kW", self.installed_capacity_kw)?;
        writeln!(f, "Demand:              {:.4} kW", self.demand_kw)?;
        write!(f, "Installation price:  {:.2}", self.total_cost)
    }
}
