//! Name Resolution Integration Tests
//!
//! Exercises normalization, name parsing, and roster lookup end to end
//! through the public API.

use arxiv_herald::core::{lookup, normalize, parse_name, strip_initials};
use arxiv_herald::domain::{MatchResult, PersonKey, PersonRecord, Role, Roster};

fn record() -> PersonRecord {
    PersonRecord {
        role: Role::Faculty,
        position: String::new(),
        image_url: String::new(),
    }
}

fn department_roster() -> Roster {
    [
        (PersonKey::new("dave", "a. bob c."), record()),
        (PersonKey::new("ferris", "edgar"), record()),
        (PersonKey::new("hausschuh", "georgina"), record()),
        (PersonKey::new("rodrigo", "marco navarro"), record()),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_normalize_is_idempotent_and_insensitive() {
    let once = normalize("É. Long");
    assert_eq!(once, normalize(&once));
    assert_eq!(once, normalize("e. long"));
}

#[test]
fn test_parse_name_canonical_forms() {
    for form in ["j.long", "joseph d. long", "j. d. long", "j long"] {
        let parsed = parse_name(form).unwrap();
        assert_eq!(parsed.last_name, "long", "form: {form}");
        assert_eq!(parsed.first_initial, 'j', "form: {form}");
    }
}

#[test]
fn test_strip_initials() {
    assert_eq!(strip_initials("j. long"), "long");
}

#[test]
fn test_lookup_scoring_table() {
    let roster = department_roster();
    let cases = [
        ("edgar ferris", PersonKey::new("ferris", "edgar"), 2),
        ("bob dave", PersonKey::new("dave", "a. bob c."), 2),
        ("G. Hausschuh", PersonKey::new("hausschuh", "georgina"), 1),
        (
            "{M. Navarro Rodrigo}",
            PersonKey::new("rodrigo", "marco navarro"),
            1,
        ),
    ];

    for (raw, expected_key, expected_score) in cases {
        let result = lookup(raw, &roster);
        assert_eq!(result.key.as_ref(), Some(&expected_key), "name: {raw}");
        assert_eq!(result.score, expected_score, "name: {raw}");
    }
}

#[test]
fn test_lookup_rejects_unparseable_and_unknown() {
    let roster = department_roster();
    assert_eq!(lookup("ferris", &roster), MatchResult::none());
    assert_eq!(lookup("%%%", &roster), MatchResult::none());
    assert_eq!(lookup("edgar poe", &roster), MatchResult::none());
}
