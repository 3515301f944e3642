use conn_align::{Distribution, ProbabilityTable};

use crate::RelationInventory;

/// Append the senses of every known connective to its text, on both sides.
///
/// `"obwohl"` becomes `"obwohl (COMPARISON:Concession:Arg2-as-denier)"`.
/// Connectives without senses keep their text. Only meant for reading.
pub fn label_alignment(
    table: &ProbabilityTable,
    source_inventory: &RelationInventory,
    target_inventory: &RelationInventory,
) -> ProbabilityTable {
    table
        .iter()
        .map(|(source, targets)| {
            let targets: Distribution = targets
                .iter()
                .map(|(target, probability)| (with_senses(target, target_inventory), *probability))
                .collect();
            (with_senses(source, source_inventory), targets)
        })
        .collect()
}

fn with_senses(connective: &str, inventory: &RelationInventory) -> String {
    match inventory.senses(connective) {
        Some(senses) => format!("{connective} ({})", senses.join(", ")),
        None => connective.to_string(),
    }
}
