// Token Set Merge
// Combines token sets by precedence into a single ordered set

use tracing::debug;

use crate::core::{TokenSet, TokenSets};

/// Merge the sets named in `order`, later sets taking precedence
///
/// A token keeps the position where it was first seen; a later set only
/// replaces its definition. Sets not listed in `order` contribute nothing,
/// and names in `order` with no matching set are skipped.
pub fn merge_token_sets<S: AsRef<str>>(sets: &TokenSets, order: &[S]) -> TokenSet {
    let mut merged = TokenSet::new();

    for set_name in order {
        let set_name = set_name.as_ref();
        let Some(set) = sets.get(set_name) else {
            debug!(set = %set_name, "skipping unknown token set in merge order");
            continue;
        };

        for (name, definition) in set {
            // IndexMap keeps the original slot when a key is re-inserted
            merged.insert(name.clone(), definition.clone());
        }
    }

    merged
}
