//! LIKE-style wildcard text matching
//!
//! Whole-string matching with two wildcards: `%` matches zero or more
//! characters, `_` matches exactly one. Case-sensitive. There is no escape
//! mechanism, so a literal `%` or `_` cannot be matched as itself; this is
//! a documented limitation of the pattern language.

/// Match `text` against `pattern` in full.
///
/// Forward scan with a single remembered backtrack point: the position just
/// past the most recent `%` and the text position where it was seen. On a
/// mismatch the last `%` absorbs one more character and matching resumes.
/// Consecutive `%` collapse to one. Cost is linear in practice and bounded
/// by O(|text| * |pattern|) in the worst case; there is no recursion.
pub fn like_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let mut t = 0;
    let mut p = 0;
    // (pattern position after the last `%`, text position it was seen at)
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '%' {
            while p < pattern.len() && pattern[p] == '%' {
                p += 1;
            }
            if p == pattern.len() {
                return true;
            }
            backtrack = Some((p, t));
        } else if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if let Some((bp, bt)) = backtrack {
            // Let the last `%` absorb one more character
            backtrack = Some((bp, bt + 1));
            p = bp;
            t = bt + 1;
        } else {
            return false;
        }
    }

    // Trailing `%` consumes nothing
    while p < pattern.len() && pattern[p] == '%' {
        p += 1;
    }
    p == pattern.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern_is_equality() {
        assert!(like_match("abc", "abc"));
        assert!(!like_match("abc", "abd"));
        assert!(!like_match("abc", "ab"));
        assert!(!like_match("ab", "abc"));
        assert!(like_match("", ""));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!like_match("ABC", "abc"));
        assert!(!like_match("abc", "ABC"));
    }

    #[test]
    fn test_percent_basic() {
        assert!(like_match("abc", "a%c"));
        assert!(like_match("ac", "a%c"));
        assert!(like_match("abc", "%b%"));
        assert!(like_match("anything", "%"));
        assert!(like_match("", "%"));
    }

    #[test]
    fn test_underscore_exactly_one() {
        assert!(like_match("abc", "a_c"));
        assert!(!like_match("abbc", "a_c"));
        assert!(!like_match("ac", "a_c"));
        assert!(like_match("x", "_"));
        assert!(!like_match("", "_"));
    }

    #[test]
    fn test_consecutive_percent_collapse() {
        assert!(like_match("abc", "a%%c"));
        assert!(like_match("ac", "a%%%c"));
        assert!(like_match("abc", "%%"));
    }

    #[test]
    fn test_trailing_percent() {
        assert!(like_match("abc", "abc%"));
        assert!(like_match("abc", "a%"));
        assert!(like_match("abc", "abc%%"));
    }

    #[test]
    fn test_unconsumed_pattern_after_text() {
        assert!(!like_match("abc", "abc_"));
        assert!(!like_match("abc", "abcd"));
        assert!(!like_match("abc", "abc%d"));
    }

    #[test]
    fn test_backtracking() {
        // The first candidate position for "bd" fails, the scan must
        // re-anchor the `%` further right.
        assert!(like_match("abcbd", "a%bd"));
        assert!(like_match("aXbXcXd", "a%c%d"));
        assert!(!like_match("abcbe", "a%bd"));
    }

    #[test]
    fn test_wildcards_mixed() {
        assert!(like_match("SELECT * FROM orders", "SELECT%FROM orders"));
        assert!(like_match("SELECT * FROM orders", "%FROM _rders"));
        assert!(!like_match("SELECT * FROM orders", "%FROM __rders"));
    }

    #[test]
    fn test_multibyte_text() {
        assert!(like_match("héllo", "h_llo"));
        assert!(like_match("héllo", "h%o"));
        assert!(!like_match("héllo", "h__llo"));
    }

    #[test]
    fn test_no_escape_mechanism() {
        // `\%` has no special meaning: the backslash is a literal and `%`
        // still floats.
        assert!(like_match("a\\bc", "a\\%c"));
        assert!(!like_match("a%c", "a\\%c"));
    }
}
