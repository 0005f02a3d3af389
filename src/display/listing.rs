// Token Listing
// Groups a set's tokens by type for display

use crate::core::{TokenDefinition, TokenSet, TokenType};

/// Tokens of one type, in set order
#[derive(Debug, Clone, PartialEq)]
pub struct TokenGroup<'a> {
    pub token_type: TokenType,
    pub label: &'static str,
    pub tokens: Vec<(&'a str, &'a TokenDefinition)>,
}

impl TokenGroup<'_> {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Group tokens by type, keeping names that contain `filter` (ignoring case)
///
/// Every type gets a group. Groups holding tokens come before empty ones;
/// otherwise the type order is kept.
pub fn group_tokens<'a>(set: &'a TokenSet, filter: &str) -> Vec<TokenGroup<'a>> {
    let filter = filter.to_lowercase();
    let mut groups: Vec<TokenGroup<'a>> = TokenType::ALL
        .iter()
        .map(|token_type| TokenGroup {
            token_type: *token_type,
            label: token_type.label(),
            tokens: set
                .iter()
                .filter(|(name, definition)| {
                    definition.token_type == *token_type && name.to_lowercase().contains(&filter)
                })
                .map(|(name, definition)| (name.as_str(), definition))
                .collect(),
        })
        .collect();

    groups.sort_by_key(TokenGroup::is_empty);
    groups
}

/// Token names in display order, across all groups
pub fn visible_token_names<'a>(set: &'a TokenSet, filter: &str) -> Vec<&'a str> {
    group_tokens(set, filter)
        .into_iter()
        .flat_map(|group| group.tokens.into_iter().map(|(name, _)| name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> TokenSet {
        [
            ("spacing.sm", TokenType::Spacing),
            ("colors.red", TokenType::Color),
            ("spacing.lg", TokenType::Spacing),
            ("shadow.card", TokenType::BoxShadow),
        ]
        .into_iter()
        .map(|(name, token_type)| (name.to_string(), TokenDefinition::new("x", token_type)))
        .collect()
    }

    #[test]
    fn test_populated_groups_first_in_type_order() {
        let set = sample_set();
        let groups = group_tokens(&set, "");

        let labels: Vec<&str> = groups.iter().take(3).map(|g| g.label).collect();
        assert_eq!(labels, vec!["Color", "Spacing", "Box Shadow"]);
        assert_eq!(groups.len(), TokenType::ALL.len());
        assert!(groups[3..].iter().all(TokenGroup::is_empty));
        assert_eq!(
            groups[1].tokens.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            vec!["spacing.sm", "spacing.lg"]
        );
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let set = sample_set();
        assert_eq!(visible_token_names(&set, "SPACING"), vec!["spacing.sm", "spacing.lg"]);
        assert!(visible_token_names(&set, "nothing").is_empty());
    }

    #[test]
    fn test_filter_matches_substrings_literally() {
        let set = sample_set();
        assert_eq!(visible_token_names(&set, "Red"), vec!["colors.red"]);
        assert!(visible_token_names(&set, "spacing*").is_empty());
        assert!(visible_token_names(&set, "s?acing").is_empty());
    }

    #[test]
    fn test_visible_names_follow_group_order() {
        let set = sample_set();
        assert_eq!(
            visible_token_names(&set, ""),
            vec!["colors.red", "spacing.sm", "spacing.lg", "shadow.card"]
        );
    }
}
