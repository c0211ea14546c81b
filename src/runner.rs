//! Linear sizing pipeline: adjust, estimate, count, select, assemble.

use std::path::Path;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::RunSettings;
use crate::error::SizingError;
use crate::io::export::export_options_csv;
use crate::parameters::{ConsumptionConfig, ParameterStore};
use crate::sizing::consumption::DAYS_PER_MONTH;
use crate::sizing::{
    PanelOption, SizingResult, adjust, count_units, estimate_power, select_cheapest,
};

/// Everything computed in one pass, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingRun {
    /// Adjusted daily consumption (kWh/day, 2 decimals).
    pub daily_average_kwh: f64,
    /// Required system power at full precision (kWp).
    pub demand_kw: f64,
    /// Every catalog entry with its unit count and total cost.
    pub options: Vec<PanelOption>,
    pub result: SizingResult,
}

impl SizingRun {
    pub fn selected(&self) -> &PanelOption {
        &self.options[self.result.selected_index]
    }
}

/// Runs the in-memory pipeline over a loaded catalog.
///
/// # Errors
///
/// * [`SizingError::NegativeDemand`] if consumption is below the feed-type allowance.
/// * [`SizingError::InvalidCatalogEntry`] if any panel has non-positive power.
/// * [`SizingError::UnitCountOverflow`] if a panel is too small to count.
/// * [`SizingError::NoFiniteCost`] if no option has a finite total cost.
pub fn run_sizing(
    catalog: &Catalog,
    consumption: &ConsumptionConfig,
) -> Result<SizingRun, SizingError> {
    // Checked before rounding: a shortfall under 0.005 kWh/day would round to -0.0.
    let billable_kwh = consumption.monthly_average_kwh - consumption.feed_type.allowance_kwh();
    if billable_kwh.is_nan() || billable_kwh < 0.0 {
        return Err(SizingError::NegativeDemand {
            value: billable_kwh / DAYS_PER_MONTH,
        });
    }

    let daily_average_kwh = adjust(consumption.monthly_average_kwh, consumption.feed_type);
    info!(
        "Adjusted consumption: {:.1} kWh/month ({}) -> {daily_average_kwh:.2} kWh/day",
        consumption.monthly_average_kwh, consumption.feed_type
    );

    let demand_kw = estimate_power(daily_average_kwh)?;
    info!("Required system power: {demand_kw:.4} kWp");

    let units = count_units(demand_kw, catalog)?;
    let selection = select_cheapest(&units, catalog)?;
    let options = PanelOption::tabulate(catalog, &units, &selection);
    for option in &options {
        debug!("{option}");
    }

    let result = SizingResult::from_option(&options[selection.index], demand_kw);
    info!(
        "Selected \"{}\": {} units, {:.2} kW, cost {:.2}",
        result.panel_name, result.units_required, result.installed_capacity_kw, result.total_cost
    );

    Ok(SizingRun {
        daily_average_kwh,
        demand_kw,
        options,
        result,
    })
}

/// Runs the full pass: load inputs, size, export and persist.
///
/// Inputs are read once before computing; outputs are written once after.
/// The parameter document is updated last, so a failed run leaves it as it was.
///
/// # Errors
///
/// Any [`SizingError`] from loading, sizing or writing.
pub fn run(settings: &RunSettings) -> Result<SizingRun, SizingError> {
    let catalog = Catalog::from_csv_file(&settings.paths.catalog)?;
    let consumption = ConsumptionConfig::from_file(&settings.paths.parameters)?;

    let run = run_sizing(&catalog, &consumption)?;

    if let Some(path) = &settings.output.options_csv {
        write_options(&run, path)?;
    }

    if settings.output.persist {
        ParameterStore::new(&settings.paths.parameters).save_result(&run.result)?;
    } else {
        info!("Persistence disabled, parameter document left unchanged");
    }

    Ok(run)
}

fn write_options(run: &SizingRun, path: &Path) -> Result<(), SizingError> {
    export_options_csv(&run.options, run.result.selected_index, path).map_err(|source| {
        SizingError::PersistenceFailure {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!("Panel options written to {}", path.display());
    Ok(())
}
