use std::fmt;

use tracing::warn;

use super::round_to;

/// Days per billing month used to turn monthly into daily consumption.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Electrical service connection class.
///
/// Determines the minimum billable consumption (availability allowance) that
/// solar generation cannot offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedType {
    SinglePhase,
    TwoPhase,
    ThreePhase,
}

impl FeedType {
    /// Label recognized for single-phase service.
    pub const SINGLE_PHASE_LABEL: &str = "monofasico";
    /// Label recognized for two-phase service.
    pub const TWO_PHASE_LABEL: &str = "bifasico";

    /// Interprets a feed-type label, case-insensitively.
    ///
    /// Anything other than the single- or two-phase label is three-phase,
    /// including typos.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case(Self::SINGLE_PHASE_LABEL) {
            Self::SinglePhase
        } else if label.eq_ignore_ascii_case(Self::TWO_PHASE_LABEL) {
            Self::TwoPhase
        } else {
            if !label.eq_ignore_ascii_case("trifasico") {
                warn!("Unrecognized feed type \"{label}\", falling back to three-phase");
            }
            Self::ThreePhase
        }
    }

    /// Monthly allowance (kWh) billed regardless of consumption.
    pub fn allowance_kwh(self) -> f64 {
        match self {
            Self::SinglePhase => 30.0,
            Self::TwoPhase => 50.0,
            Self::ThreePhase => 100.0,
        }
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SinglePhase => "single-phase",
            Self::TwoPhase => "two-phase",
            Self::ThreePhase => "three-phase",
        };
        f.write_str(s)
    }
}

/// Converts a raw monthly average into the adjusted daily average (kWh/day).
///
/// Subtracts the feed-type allowance, divides by [`DAYS_PER_MONTH`] and rounds
/// to 2 decimals. No lower bound is applied: a monthly average below the
/// allowance yields a negative figure, which the demand stage rejects.
pub fn adjust(monthly_average_kwh: f64, feed_type: FeedType) -> f64 {
    let billable = monthly_average_kwh - feed_type.allowance_kwh();
    round_to(billable / DAYS_PER_MONTH, 2)
}
