//! Approximate name matching against the roster.
//!
//! Scores express confidence that a free-text author name denotes a
//! specific roster entry: 2 is a confident match, 1 is last name plus a
//! consistent first initial only, 0 is no match.

use tracing::warn;

use crate::domain::{MatchResult, Roster};

use super::name::{is_initial_token, parse_name, strip_initials};
use super::normalize::normalize;

/// Resolve one raw author name against the roster.
///
/// The name is normalized, parsed, and compared against every roster
/// entry sharing its last name. The scan returns the *first* entry with a
/// nonzero score, in roster insertion order; ties between equally
/// plausible candidates are broken by that order, deliberately, so runs
/// are reproducible. A name that fails to parse scores 0 and is logged,
/// never a hard error.
pub fn lookup(raw_name: &str, roster: &Roster) -> MatchResult {
    let normalized = normalize(raw_name);
    let parsed = match parse_name(&normalized) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(name = %normalized, %err, "unable to parse author name");
            return MatchResult::none();
        }
    };

    let query_first = parsed.first_names.trim();
    let query_initial = parsed.first_initial;

    for (key, _) in roster.iter() {
        if key.last != parsed.last_name {
            continue;
        }
        let score = score_first_names(&key.firsts, query_first, query_initial);
        if score > 0 {
            return MatchResult::matched(key.clone(), score);
        }
    }

    MatchResult::none()
}

/// Score a candidate's first names against the query's, both sharing a
/// last name. Rules are evaluated in order; the first satisfied rule wins.
fn score_first_names(person_first: &str, query_first: &str, query_initial: char) -> u8 {
    // 1. Exact first-name agreement.
    if person_first == query_first {
        return 2;
    }

    // 2. The roster holds an abbreviated form consistent with a fuller query
    //    ("j. d." vs "joseph d. smith" style).
    if query_first.starts_with(person_first) {
        return 2;
    }

    // 3. The query is an abbreviated form of the roster's fuller name.
    //    The inequality guard keeps a bare initial from substring-matching
    //    the middle of a spelled-out name.
    let initial_str = query_initial.to_string();
    if query_first != initial_str
        && person_first.contains(query_first)
        && strip_initials(person_first).starts_with(query_first)
    {
        return 2;
    }

    // 4. The roster form appears inside the query once the query's own
    //    initials are discounted.
    if query_first.contains(person_first) && strip_initials(query_first).starts_with(person_first)
    {
        return 2;
    }

    // 5. Only initial-level agreement: weak match.
    if person_first.starts_with(query_initial) && is_initial_token(query_first) {
        return 1;
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PersonKey, PersonRecord, Role};

    fn test_roster() -> Roster {
        let record = PersonRecord {
            role: Role::Faculty,
            position: String::new(),
            image_url: String::new(),
        };
        [
            (PersonKey::new("dave", "a. bob c."), record.clone()),
            (PersonKey::new("ferris", "edgar"), record.clone()),
            (PersonKey::new("hausschuh", "georgina"), record.clone()),
            (PersonKey::new("rodrigo", "marco navarro"), record),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_exact_first_name() {
        let result = lookup("edgar ferris", &test_roster());
        assert_eq!(result.key, Some(PersonKey::new("ferris", "edgar")));
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_query_inside_roster_form_after_initials() {
        let result = lookup("bob dave", &test_roster());
        assert_eq!(result.key, Some(PersonKey::new("dave", "a. bob c.")));
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_bare_initial_is_weak_match() {
        let result = lookup("G. Hausschuh", &test_roster());
        assert_eq!(result.key, Some(PersonKey::new("hausschuh", "georgina")));
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_brackets_stripped_by_normalization() {
        let result = lookup("{M. Navarro Rodrigo}", &test_roster());
        assert_eq!(result.key, Some(PersonKey::new("rodrigo", "marco navarro")));
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_same_last_different_first_is_no_match() {
        let result = lookup("zelda ferris", &test_roster());
        assert_eq!(result, MatchResult::none());
    }

    #[test]
    fn test_unknown_last_name_is_no_match() {
        let result = lookup("edgar allan", &test_roster());
        assert_eq!(result, MatchResult::none());
    }

    #[test]
    fn test_unparseable_name_is_no_match() {
        assert_eq!(lookup("ferris", &test_roster()), MatchResult::none());
        assert_eq!(lookup("", &test_roster()), MatchResult::none());
    }

    #[test]
    fn test_first_candidate_wins_in_insertion_order() {
        let record = PersonRecord {
            role: Role::Student,
            position: String::new(),
            image_url: String::new(),
        };
        let roster: Roster = [
            (PersonKey::new("long", "jane"), record.clone()),
            (PersonKey::new("long", "joseph"), record),
        ]
        .into_iter()
        .collect();

        // Both entries agree on the initial; insertion order breaks the tie.
        let result = lookup("J. Long", &roster);
        assert_eq!(result.key, Some(PersonKey::new("long", "jane")));
        assert_eq!(result.score, 1);
    }
}
