use conn_align::Lexicon;
use tracing::warn;

use crate::{RelationGroups, RelationInventory};

/// Keep the lexicon entries with at least one sense in `relation`'s group.
///
/// Entries the inventory does not know are dropped. An unknown relation
/// yields an empty lexicon.
pub fn filter_for_relation(
    lexicon: &Lexicon,
    inventory: &RelationInventory,
    groups: &RelationGroups,
    relation: &str,
) -> Lexicon {
    let Some(group) = groups.senses(relation) else {
        warn!(relation, "unknown discourse relation");
        return Lexicon::new();
    };

    Lexicon::from_entries(
        lexicon
            .iter()
            .filter(|entry| {
                inventory
                    .senses(entry)
                    .map_or(false, |senses| senses.iter().any(|sense| group.contains(sense)))
            })
            .cloned(),
    )
}
