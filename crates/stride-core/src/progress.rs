//! Progress calculation over estimated work items.
//!
//! `calculate` is pure and cheap enough to run on every refresh. Sums are taken
//! over the estimates in sorted order, so permuting the input yields a
//! bit-identical result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Anything with an hour estimate and a completion flag.
pub trait Estimated {
    fn eta(&self) -> f64;
    fn is_completed(&self) -> bool;
}

/// Completed vs total estimated hours and the derived percentage.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Progress {
    pub completed_estimate: f64,
    pub total_estimate: f64,
    /// Always within `[0, 100]`; `0` when there is no estimated work.
    pub percent: f64,
}

/// Compute progress for a set of estimated items.
#[must_use]
pub fn calculate<T: Estimated>(items: &[T]) -> Progress {
    let total_estimate = ordered_sum(items.iter().map(Estimated::eta));
    let completed_estimate = ordered_sum(
        items
            .iter()
            .filter(|item| item.is_completed())
            .map(Estimated::eta),
    );
    Progress {
        completed_estimate,
        total_estimate,
        percent: percent_of(completed_estimate, total_estimate),
    }
}

/// Sum of all estimates, independent of item order.
#[must_use]
pub fn total_estimate<T: Estimated>(items: &[T]) -> f64 {
    ordered_sum(items.iter().map(Estimated::eta))
}

/// `100 * part / whole`, clamped to `[0, 100]`. `0` for an empty whole and
/// whenever the ratio is not a real number.
#[must_use]
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    let percent = 100.0 * part / whole;
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn ordered_sum(values: impl Iterator<Item = f64>) -> f64 {
    // NaN and negative estimates count as zero.
    let mut values: Vec<f64> = values.map(|v| v.max(0.0)).collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}
