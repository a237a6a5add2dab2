//! Matching and replacement helpers shared by the rule implementations.

use regex::{Captures, Regex, RegexBuilder};
use std::collections::HashMap;

use super::RuleError;

/// Large pool-derived alternations (thousands of package names) need more
/// room than the regex crate grants by default.
const PATTERN_SIZE_LIMIT: usize = 256 * (1 << 20);

pub(crate) fn compile(rule: &'static str, pattern: &str) -> Result<Regex, RuleError> {
    RegexBuilder::new(pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .dfa_size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|source| RuleError::Pattern { rule, source })
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

const ASCII_BOUNDARY: &str = r"(?-u:\b)";

fn is_ascii_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Builds `(?:a|b|...)` over `entries`, longest first so the longest candidate
/// wins at any position. With `bounded`, each alternative gets an ASCII `\b`
/// on every side where it begins or ends with an ASCII word character; a
/// Unicode `\b` makes the lazy DFA bail out on non-ASCII haystacks.
pub(crate) fn alternation<S: AsRef<str>>(entries: &[S], bounded: bool) -> String {
    let mut sorted: Vec<&str> = entries.iter().map(|e| e.as_ref()).collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    let parts: Vec<String> = sorted
        .into_iter()
        .map(|entry| {
            let escaped = regex::escape(entry);
            if !bounded {
                return escaped;
            }
            let lead = entry.chars().next().is_some_and(is_ascii_word_char);
            let trail = entry.chars().last().is_some_and(is_ascii_word_char);
            format!(
                "{}{}{}",
                if lead { ASCII_BOUNDARY } else { "" },
                escaped,
                if trail { ASCII_BOUNDARY } else { "" }
            )
        })
        .collect();
    format!("(?:{})", parts.join("|"))
}

/// Every distinct match of `pattern` across `texts`, in first-seen order.
pub(crate) fn distinct_matches<'a, I>(pattern: &Regex, texts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut found: Vec<String> = Vec::new();
    for text in texts {
        for m in pattern.find_iter(text) {
            if !found.iter().any(|f| f == m.as_str()) {
                found.push(m.as_str().to_string());
            }
        }
    }
    found
}

/// Rewrites each match of `pattern` whose text is a key of `mapping`, in one
/// pass, so inserted values are never re-matched.
pub(crate) fn substitute(pattern: &Regex, text: &str, mapping: &HashMap<String, String>) -> String {
    pattern
        .replace_all(text, |caps: &Captures| {
            let matched = &caps[0];
            mapping
                .get(matched)
                .cloned()
                .unwrap_or_else(|| matched.to_string())
        })
        .into_owned()
}

/// Replaces whole-word occurrences of `old` with `new`.
///
/// An occurrence counts when the characters around it do not extend a word
/// edge of `old`: `10.0.0.1` is not replaced inside `10.0.0.10`.
pub(crate) fn replace_word(text: &str, old: &str, new: &str) -> String {
    if old.is_empty() {
        return text.to_string();
    }
    let lead = old.chars().next().is_some_and(is_word_char);
    let trail = old.chars().last().is_some_and(is_word_char);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, _) in text.match_indices(old) {
        let end = start + old.len();
        let before_ok = !lead || !text[..start].chars().next_back().is_some_and(is_word_char);
        let after_ok = !trail || !text[end..].chars().next().is_some_and(is_word_char);
        if before_ok && after_ok {
            out.push_str(&text[cursor..start]);
            out.push_str(new);
            cursor = end;
        }
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternation_prefers_longest_candidate() {
        let re = compile("test", &alternation(&["react", "react-dom"], true)).unwrap();
        let found: Vec<&str> = re.find_iter("npm i react-dom react").map(|m| m.as_str()).collect();
        assert_eq!(found, vec!["react-dom", "react"]);
    }

    #[test]
    fn bounded_alternation_skips_embedded_words() {
        let re = compile("test", &alternation(&["re"], true)).unwrap();
        assert!(!re.is_match("require"));
        assert!(re.is_match("pip install re"));
    }

    #[test]
    fn bounded_alternation_uses_ascii_boundaries() {
        let pattern = alternation(&["react", "@types/node"], true);
        assert_eq!(pattern, r"(?:@types/node(?-u:\b)|(?-u:\b)react(?-u:\b))");
        let re = compile("test", &pattern).unwrap();
        let found: Vec<&str> = re
            .find_iter("npm ERR! peer react\u{2014}see \u{2019}react\u{2019}, not reactive")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["react", "react"]);
    }

    #[test]
    fn distinct_matches_keeps_first_seen_order() {
        let re = Regex::new(r"\d+").unwrap();
        let found = distinct_matches(&re, ["7 3 7", "9 3"]);
        assert_eq!(found, vec!["7", "3", "9"]);
    }

    #[test]
    fn substitute_is_single_pass() {
        let re = Regex::new(r"\b(?:a|b)\b").unwrap();
        let mapping = HashMap::from([
            ("a".to_string(), "b".to_string()),
            ("b".to_string(), "c".to_string()),
        ]);
        assert_eq!(substitute(&re, "a b a", &mapping), "b c b");
    }

    #[test]
    fn replace_word_respects_boundaries() {
        assert_eq!(replace_word("10.0.0.1 10.0.0.10", "10.0.0.1", "X"), "X 10.0.0.10");
        assert_eq!(replace_word("kill 1234; ps 12345", "1234", "99"), "kill 99; ps 12345");
        assert_eq!(replace_word("", "a", "b"), "");
    }
}
