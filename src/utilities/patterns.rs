// Pattern Matching Utilities
// Glob-like matching for token name filters and set exclusions

/// Check if a name matches a pattern (case-insensitive)
///
/// A pattern without `*` matches any name containing it; an empty pattern
/// matches everything.
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    let name = name.to_lowercase();
    let pattern = pattern.to_lowercase();

    if pattern.starts_with('*') {
        // Wildcard at start: match suffix
        name.ends_with(&pattern[1..])
    } else if pattern.ends_with('*') {
        // Wildcard at end: match prefix
        name.starts_with(&pattern[..pattern.len() - 1])
    } else if pattern.contains('*') {
        let parts: Vec<&str> = pattern.split('*').collect();
        if parts.len() == 2 {
            name.starts_with(parts[0]) && name.ends_with(parts[1])
        } else {
            name.contains(&pattern.replace('*', ""))
        }
    } else {
        name.contains(&pattern)
    }
}

/// Pattern matcher for excluding token sets by name
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    patterns: Vec<String>,
}

impl PatternMatcher {
    /// Create a new pattern matcher with the given patterns
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Check if a name should be excluded
    pub fn should_exclude(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| matches_pattern(name, p))
    }

    /// Get all patterns
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_pattern() {
        assert!(matches_pattern("colors.primary", "*primary"));
        assert!(!matches_pattern("colors.secondary.dark", "*primary"));
    }

    #[test]
    fn test_prefix_pattern() {
        assert!(matches_pattern("$themes", "$*"));
        assert!(!matches_pattern("global", "$*"));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        assert!(matches_pattern("colors.Brand.primary", "brand"));
        assert!(matches_pattern("anything", ""));
        assert!(!matches_pattern("spacing.small", "brand"));
    }

    #[test]
    fn test_pattern_matcher() {
        let matcher = PatternMatcher::new(vec!["$*".to_string(), "*draft".to_string()]);

        assert!(matcher.should_exclude("$metadata"));
        assert!(matcher.should_exclude("themes/draft"));
        assert!(!matcher.should_exclude("global"));
        assert!(!PatternMatcher::default().should_exclude("global"));
    }
}
