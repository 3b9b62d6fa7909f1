//! Availability gate and the named series bundles handed to consumers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use trendlens_core::DerivedSeries;

/// Default minimum number of defined points before a series is shown.
pub const DEFAULT_MIN_POINTS: usize = 10;

/// Decides whether a derived series holds enough data to be worth drawing.
///
/// Short histories legitimately produce mostly or entirely absent series; a
/// consumer uses this verdict to suppress or label the overlay instead of
/// rendering a misleading line. Insufficient data is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityPolicy {
    /// Minimum number of defined points a series must hold.
    pub min_points: usize,
}

impl Default for AvailabilityPolicy {
    fn default() -> Self {
        Self {
            min_points: DEFAULT_MIN_POINTS,
        }
    }
}

impl AvailabilityPolicy {
    /// Creates a policy with a custom threshold.
    pub fn new(min_points: usize) -> Self {
        Self { min_points }
    }

    /// True when the series holds at least the required number of points.
    pub fn is_available(&self, series: &DerivedSeries) -> bool {
        series.defined_len() >= self.min_points
    }
}

/// One named derived series plus its availability verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    /// Stable name of the series within its bundle.
    pub name: String,
    /// The computed series, timestamp-aligned with its source prices.
    pub series: DerivedSeries,
    /// Verdict of the availability policy for this series.
    pub available: bool,
}

impl IndicatorSeries {
    /// Wraps a series under `name`, stamping the policy's verdict on it.
    pub fn gated(
        name: impl Into<String>,
        series: DerivedSeries,
        policy: AvailabilityPolicy,
    ) -> Self {
        let name = name.into();
        let available = policy.is_available(&series);
        if !available {
            debug!(
                name = %name,
                defined = series.defined_len(),
                required = policy.min_points,
                "series below availability threshold"
            );
        }
        Self {
            name,
            series,
            available,
        }
    }
}

/// A bundle of named series computed from one price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    entries: Vec<IndicatorSeries>,
}

impl IndicatorResult {
    /// Assembles a bundle from its entries.
    pub fn from_entries(entries: Vec<IndicatorSeries>) -> Self {
        Self { entries }
    }

    /// The entries in the order they were computed.
    pub fn entries(&self) -> &[IndicatorSeries] {
        &self.entries
    }

    /// Looks up an entry by name.
    pub fn get(&self, name: &str) -> Option<&IndicatorSeries> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// True when the named series exists and passed the availability gate.
    pub fn is_available(&self, name: &str) -> bool {
        self.get(name).is_some_and(|entry| entry.available)
    }
}
