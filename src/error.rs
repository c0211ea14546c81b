//! Error taxonomy for the sizing pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every way a sizing run can fail.
///
/// Errors are raised to the entry point and reported once; nothing is retried.
#[derive(Debug, Error)]
pub enum SizingError {
    /// Consumption parameters are absent or incomplete.
    #[error("missing configuration in \"{}\": {reason}", .path.display())]
    MissingConfiguration { path: PathBuf, reason: String },

    /// A catalog row has a non-positive (or non-finite) power rating.
    #[error("invalid catalog entry #{index} \"{name}\": power must be > 0 kW, got {power_kw}")]
    InvalidCatalogEntry {
        index: usize,
        name: String,
        power_kw: f64,
    },

    /// Demand over a panel's power needs more units than can be counted.
    #[error("catalog entry #{index} \"{name}\" would need {units} units, beyond the supported count")]
    UnitCountOverflow {
        index: usize,
        name: String,
        units: f64,
    },

    /// The catalog has no rows.
    #[error("panel catalog is empty")]
    EmptyCatalog,

    /// The catalog file could not be opened or parsed.
    #[error("cannot read panel catalog \"{}\": {source}", .path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Adjusted consumption (and therefore demand) came out negative.
    ///
    /// `value` is the offending figure: daily consumption (kWh/day) when raised
    /// by the adjuster or estimator, demand (kW) when raised by the counter.
    #[error("negative demand ({value}): monthly consumption is below the feed-type allowance")]
    NegativeDemand { value: f64 },

    /// Every option's total cost is NaN or infinite, so none can be compared.
    #[error("no catalog entry has a finite total cost")]
    NoFiniteCost,

    /// Unit counts and catalog do not line up one-to-one.
    #[error("unit counts ({units}) do not match catalog size ({catalog})")]
    LengthMismatch { units: usize, catalog: usize },

    /// The parameter document could not be written.
    #[error("cannot persist \"{}\": {source}", .path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The updated document could not be serialized.
    #[error("cannot serialize parameter document: {0}")]
    Serialization(#[from] serde_json::Error),
}
