//! Two-pass rule resolution

use retune_core::{like_match, OverrideRule};

/// Resolves a request to at most one override rule.
pub struct RuleMatcher;

impl RuleMatcher {
    /// Find the rule governing a request.
    ///
    /// Two independent passes over the stored order, never merged:
    ///
    /// 1. Exact identity: when the request carries a non-zero key, the
    ///    first rule with that key wins. Identity rules beat pattern rules
    ///    system-wide, independent of priority, because key comparison is
    ///    exact while pattern matching is a heuristic fallback.
    /// 2. Pattern: only when pass 1 found nothing and raw text is present,
    ///    the first rule whose pattern matches the text wins.
    ///
    /// No match in either pass means the caller proceeds with no override.
    pub fn resolve<'a>(
        rules: &'a [OverrideRule],
        identity_key: Option<i64>,
        text: Option<&str>,
    ) -> Option<&'a OverrideRule> {
        if let Some(key) = identity_key.filter(|key| *key != 0) {
            if let Some(rule) = rules.iter().find(|rule| rule.identity_key == Some(key)) {
                return Some(rule);
            }
        }

        if let Some(text) = text {
            if let Some(rule) = rules.iter().find(|rule| {
                rule.text_pattern
                    .as_deref()
                    .is_some_and(|pattern| like_match(text, pattern))
            }) {
                return Some(rule);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_match_ignores_text() {
        let rules = vec![
            OverrideRule::new().with_identity_key(7).with_setting("a", "1"),
            OverrideRule::new().with_pattern("%").with_setting("b", "2"),
        ];

        let rule = RuleMatcher::resolve(&rules, Some(7), Some("anything")).unwrap();
        assert_eq!(rule.identity_key, Some(7));

        let rule = RuleMatcher::resolve(&rules, Some(7), None).unwrap();
        assert_eq!(rule.identity_key, Some(7));
    }

    #[test]
    fn test_identity_beats_pattern_regardless_of_order() {
        // Pattern rule listed first (higher store priority); the identity
        // rule still wins system-wide.
        let rules = vec![
            OverrideRule::new().with_pattern("SELECT%").with_priority(100),
            OverrideRule::new().with_identity_key(42).with_priority(1),
        ];

        let rule = RuleMatcher::resolve(&rules, Some(42), Some("SELECT 1")).unwrap();
        assert_eq!(rule.identity_key, Some(42));
    }

    #[test]
    fn test_first_identity_rule_in_store_order_wins() {
        let rules = vec![
            OverrideRule::new().with_identity_key(9).with_setting("a", "1"),
            OverrideRule::new().with_identity_key(9).with_setting("a", "2"),
        ];

        let rule = RuleMatcher::resolve(&rules, Some(9), None).unwrap();
        assert_eq!(rule.settings[0].value, "1");
    }

    #[test]
    fn test_pattern_pass_when_no_identity_match() {
        let rules = vec![
            OverrideRule::new().with_identity_key(1),
            OverrideRule::new().with_pattern("%orders%"),
        ];

        let rule = RuleMatcher::resolve(&rules, Some(2), Some("SELECT * FROM orders")).unwrap();
        assert_eq!(rule.text_pattern.as_deref(), Some("%orders%"));
    }

    #[test]
    fn test_first_matching_pattern_in_store_order_wins() {
        let rules = vec![
            OverrideRule::new().with_pattern("%orders%").with_setting("a", "1"),
            OverrideRule::new().with_pattern("SELECT%").with_setting("a", "2"),
        ];

        let rule = RuleMatcher::resolve(&rules, None, Some("SELECT * FROM orders")).unwrap();
        assert_eq!(rule.settings[0].value, "1");
    }

    #[test]
    fn test_zero_key_skips_identity_pass() {
        let rules = vec![OverrideRule::new().with_pattern("x%")];
        let rule = RuleMatcher::resolve(&rules, Some(0), Some("xyz")).unwrap();
        assert_eq!(rule.text_pattern.as_deref(), Some("x%"));
    }

    #[test]
    fn test_inert_rule_never_matches() {
        let rules = vec![OverrideRule::new().with_setting("a", "1")];
        assert!(RuleMatcher::resolve(&rules, Some(5), Some("anything")).is_none());
    }

    #[test]
    fn test_no_match_without_text_or_key() {
        let rules = vec![
            OverrideRule::new().with_identity_key(1),
            OverrideRule::new().with_pattern("%"),
        ];
        assert!(RuleMatcher::resolve(&rules, None, None).is_none());
    }
}
