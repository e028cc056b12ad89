//! Name text canonicalization.
//!
//! Every name fragment crosses this boundary before any comparison,
//! so downstream equality checks are plain `==` on strings.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

fn non_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w]").unwrap())
}

/// Canonicalize a free-text name fragment for comparison.
///
/// Every character that is not a Unicode word character becomes a space,
/// the text is NFKD-decomposed with combining marks dropped (so accented
/// letters compare equal to their base letters), lowercased, and trimmed.
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let spaced = non_word_re().replace_all(text, " ");
    let folded: String = spaced
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();
    folded.trim().to_string()
}
