//! Splitting a name string into first-names span, initial, and last name.
//!
//! The grammar is fixed: tokens are separated by '.' or whitespace, the
//! final maximal run of word characters is the last name, and everything
//! before it is the first-names span. A single-token name does not parse.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// A name decomposed by the fixed grammar.
///
/// Transient: built per lookup, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// First-names span with its original delimiters (e.g. `"joseph d. "`)
    pub first_names: String,
    /// First character of the very first token
    pub first_initial: char,
    /// Final maximal run of word characters
    pub last_name: String,
}

/// A name string that does not match the expected grammar.
///
/// Recovered locally by callers as a zero-score result; never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameParseError {
    #[error("name contains no word characters")]
    NoWordCharacters,
    #[error("name has only one token; expected first name(s) before a last name")]
    SingleToken,
    #[error("text before the last name does not form '.'/space-delimited tokens")]
    Grammar,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_delimiter(c: char) -> bool {
    c == '.' || c.is_whitespace()
}

/// Parse a (normalized) name string into its components.
///
/// `"j.long"` → first `"j."`, initial `'j'`, last `"long"`;
/// `"joseph d. long"` → first `"joseph d. "`, initial `'j'`, last `"long"`.
pub fn parse_name(query: &str) -> Result<ParsedName, NameParseError> {
    // Locate the final maximal run of word characters.
    let last_end = query
        .char_indices()
        .rev()
        .find(|(_, c)| is_word_char(*c))
        .map(|(i, c)| i + c.len_utf8())
        .ok_or(NameParseError::NoWordCharacters)?;

    let mut last_start = last_end;
    for (i, c) in query[..last_end].char_indices().rev() {
        if is_word_char(c) {
            last_start = i;
        } else {
            break;
        }
    }

    let first_names = &query[..last_start];
    if first_names.chars().all(|c| !is_word_char(c)) {
        return Err(NameParseError::SingleToken);
    }

    // The span must start on a token and end on a delimiter run.
    let first_initial = match first_names.chars().next() {
        Some(c) if is_word_char(c) => c,
        _ => return Err(NameParseError::Grammar),
    };
    match first_names.chars().last() {
        Some(c) if is_delimiter(c) => {}
        _ => return Err(NameParseError::Grammar),
    }

    Ok(ParsedName {
        first_names: first_names.to_string(),
        first_initial,
        last_name: query[last_start..last_end].to_string(),
    })
}

/// True iff `s` denotes an initial: a single word character followed by
/// '.', whitespace, or end of string.
pub fn is_initial_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_word_char(c) => match chars.next() {
            None => true,
            Some(next) => is_delimiter(next),
        },
        _ => false,
    }
}

fn initials_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\w\.").unwrap())
}

/// Drop every "single letter + period" token from a first-names span and
/// collapse the remaining whitespace.
///
/// Used to compare a fully spelled name against an abbreviated one after
/// discounting initials: `strip_initials("a. bob c.") == "bob"`.
pub fn strip_initials(name_span: &str) -> String {
    let stripped = initials_re().replace_all(name_span, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
