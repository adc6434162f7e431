use regex::Regex;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bhttps?://[^\s<>"']+"#).unwrap());

/// URLs embedded in free text, in order of appearance. Trailing sentence
/// punctuation is not treated as part of the link.
pub fn extract_links(text: &str) -> Vec<&str> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', ')']))
        .collect()
}
