//! Shared token helpers used across the indexer, extractor and filters.

/// ASCII punctuation, in the order Python's `string.punctuation` lists it.
///
/// A token counts as punctuation when it is a non-empty substring of this
/// string, so `","` and `")."` match but the gap marker `"..."` does not.
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

pub(crate) fn is_punctuation(token: &str) -> bool {
    !token.is_empty() && PUNCTUATION.contains(token)
}

/// Non-empty and made only of alphabetic characters.
pub(crate) fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

pub(crate) fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// First occurrence of `needle` as a contiguous token run inside `haystack`.
pub(crate) fn find_token_run(haystack: &[String], needle: &[&str]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&start| {
        haystack[start..start + needle.len()]
            .iter()
            .zip(needle)
            .all(|(token, expected)| token == expected)
    })
}
