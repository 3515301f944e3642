//! Relative-frequency estimation over candidate observations.

use std::collections::BTreeMap;

use crate::tables::Distribution;
use crate::{CandidateList, ProbabilityTable};

/// Turn raw observations into per-key target distributions.
///
/// Unaligned (`""`) observations take no part in the estimate, neither as a
/// target nor in the total, so every key sums to 1. A key observed only as
/// unaligned has no distribution and is absent from the result.
pub fn estimate(candidates: &CandidateList) -> ProbabilityTable {
    candidates
        .iter()
        .filter_map(|(key, observations)| {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for target in observations.iter().filter(|target| !target.is_empty()) {
                *counts.entry(target.as_str()).or_default() += 1;
            }

            let total: usize = counts.values().sum();
            if total == 0 {
                return None;
            }

            let distribution: Distribution = counts
                .into_iter()
                .map(|(target, count)| (target.to_string(), count as f64 / total as f64))
                .collect();
            Some((key.clone(), distribution))
        })
        .collect()
}
