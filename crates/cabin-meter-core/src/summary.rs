//! Aggregate statistics over usage records.

use serde::{Deserialize, Serialize};

use crate::usage::Usage;

/// Totals over a set of usages.
///
/// Energy and cost only count completed usages; stay days count every usage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    /// Number of usages considered.
    pub usage_count: u64,
    /// Usages with a final reading.
    pub completed_count: u64,
    /// Usages still waiting for a final reading.
    pub open_count: u64,
    /// Sum of `kwh_used` over completed usages.
    pub total_kwh: f64,
    /// Sum of `kwh_used * cost_per_kwh` over completed usages.
    pub total_cost: f64,
    /// Sum of inclusive stay lengths.
    pub total_stay_days: i64,
}

impl UsageSummary {
    /// Fold a set of usages into totals.
    #[must_use]
    pub fn from_usages<'a>(usages: impl IntoIterator<Item = &'a Usage>) -> Self {
        usages.into_iter().fold(Self::default(), |mut summary, usage| {
            summary.usage_count += 1;
            summary.total_stay_days += usage.stay_days();
            match (usage.kwh_used, usage.cost()) {
                (Some(kwh), Some(cost)) => {
                    summary.completed_count += 1;
                    summary.total_kwh += kwh;
                    summary.total_cost += cost;
                }
                _ => summary.open_count += 1,
            }
            summary
        })
    }
}
