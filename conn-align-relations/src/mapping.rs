//! Relation-to-relation flows.
//!
//! Each connective is reduced to the sorted set of its relation names
//! ([`relation_name`]). The probability mass of every source connective is
//! then added up per (source set, target set) and normalized per source set:
//!
//! ```text
//! obwohl  {Concession}  → bien que {Concession}: 0.6, mais {Concession, Contrast}: 0.2
//! trotzdem {Concession} → pourtant {Concession}: 1.0
//!
//! Concession: 2 connectives → Concession: 0.8, Concession, Contrast: 0.2
//! ```

use std::collections::{BTreeMap, BTreeSet};

use conn_align::ProbabilityTable;
use serde::Serialize;

use crate::{relation_name, RelationInventory};

/// Where the connectives of one relation set align to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RelationFlow {
    /// Source connectives with this relation set.
    pub connectives: usize,
    /// Target relation set → share of the aligned probability mass.
    pub targets: BTreeMap<String, f64>,
}

/// Source relation set (names joined with `", "`) → its flow.
pub type RelationMapping = BTreeMap<String, RelationFlow>;

pub fn relation_mapping(
    table: &ProbabilityTable,
    source_inventory: &RelationInventory,
    target_inventory: &RelationInventory,
) -> RelationMapping {
    let mut mapping = RelationMapping::new();

    for (source, targets) in table.iter() {
        let Some(source_senses) = source_inventory.senses(source) else {
            continue;
        };
        let flow = mapping.entry(relation_set(source_senses)).or_default();
        flow.connectives += 1;

        for (target, probability) in targets {
            if let Some(target_senses) = target_inventory.senses(target) {
                *flow.targets.entry(relation_set(target_senses)).or_default() += probability;
            }
        }
    }

    for flow in mapping.values_mut() {
        let total: f64 = flow.targets.values().sum();
        if total > 0.0 {
            for share in flow.targets.values_mut() {
                *share /= total;
            }
        }
    }
    mapping
}

fn relation_set(senses: &[String]) -> String {
    let names: BTreeSet<String> = senses.iter().map(|sense| relation_name(sense)).collect();
    names.into_iter().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use conn_align::Distribution;

    fn distribution(entries: &[(&str, f64)]) -> Distribution {
        entries.iter().map(|(t, p)| (t.to_string(), *p)).collect()
    }

    #[test]
    fn flows_are_counted_and_normalized() {
        let mut german = RelationInventory::new();
        german.insert("obwohl", ["COMPARISON:Concession:Arg2-as-denier"]);
        german.insert("trotzdem", ["COMPARISON:Concession:Arg1-as-denier"]);
        let mut french = RelationInventory::new();
        french.insert("bien que", ["COMPARISON:Concession"]);
        french.insert("pourtant", ["COMPARISON:concession"]);
        french.insert("mais", ["COMPARISON:Contrast", "COMPARISON:Concession"]);

        let table: ProbabilityTable = [
            (
                "obwohl".to_string(),
                distribution(&[("bien que", 0.6), ("mais", 0.2), ("quoique", 0.2)]),
            ),
            ("trotzdem".to_string(), distribution(&[("pourtant", 1.0)])),
            ("weil".to_string(), distribution(&[("parce que", 1.0)])),
        ]
        .into_iter()
        .collect();

        let mapping = relation_mapping(&table, &german, &french);
        assert_eq!(mapping.len(), 1);
        let flow = &mapping["Concession"];
        assert_eq!(flow.connectives, 2);
        assert!((flow.targets["Concession"] - 1.6 / 1.8).abs() < 1e-9);
        assert!((flow.targets["Concession, Contrast"] - 0.2 / 1.8).abs() < 1e-9);
    }

    #[test]
    fn source_without_known_targets_has_an_empty_flow() {
        let mut german = RelationInventory::new();
        german.insert("sobald", ["TEMPORAL:Asynchronous:Succession"]);
        let table: ProbabilityTable = [("sobald".to_string(), distribution(&[("dès que", 1.0)]))]
            .into_iter()
            .collect();

        let mapping = relation_mapping(&table, &german, &RelationInventory::new());
        assert_eq!(mapping["Asynchronous"], RelationFlow { connectives: 1, targets: BTreeMap::new() });
    }
}
