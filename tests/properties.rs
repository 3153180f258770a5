//! Property-based tests for the decoder.
//!
//! These run the public entry points against randomly generated documents to catch edge cases
//! the hand-written unit tests miss.

use std::collections::HashMap;

use ini::{DEFAULT_SECTION, DecodeError, decode};
use proptest::prelude::*;

/// Keys start with a letter so the line is never taken for a comment or a header.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_ .-]{0,15}".prop_map(|s| s.trim().to_owned())
}

/// Values without comment markers, backslashes or line breaks are stored verbatim.
fn plain_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \t=:'\"\\[\\]{}.,/-]{0,30}".prop_map(String::from)
}

/// Free-form text, plus a narrow alphabet that hits headers, delimiters and markers often.
fn arbitrary_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["\\PC{0,200}", "[\\[\\]a-z=:#; \t\r\n\\\\]{0,80}"]
}

fn section_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9 _.-]{1,12}".prop_map(String::from),
    ]
}

fn document_strategy() -> impl Strategy<Value = Vec<(String, Vec<(String, String)>)>> {
    prop::collection::vec(
        (
            section_name_strategy(),
            prop::collection::vec((key_strategy(), plain_value_strategy()), 1..6),
        ),
        1..5,
    )
}

fn render(document: &[(String, Vec<(String, String)>)], newline: &str) -> String {
    let mut text = String::new();

    for (name, entries) in document {
        text.push_str(&format!("[{name}] ; section{newline}"));
        for (key, value) in entries {
            text.push_str(&format!("{key}={value}{newline}"));
        }
        text.push_str(newline);
    }

    text
}

/// What the decoder should produce: later sections and keys overwrite earlier ones.
fn expected(
    document: &[(String, Vec<(String, String)>)],
) -> HashMap<String, HashMap<String, String>> {
    let mut expected = HashMap::<String, HashMap<String, String>>::new();

    for (name, entries) in document {
        let section = expected.entry(name.clone()).or_default();
        for (key, value) in entries {
            section.insert(key.clone(), value.clone());
        }
    }

    expected
}

proptest! {
    #[test]
    fn decodes_or_points_at_a_header(text in arbitrary_text_strategy()) {
        match decode(&text) {
            Ok(config) => {
                for section in config.iter().flat_map(|config| config.sections()) {
                    for (key, _) in section.entries() {
                        prop_assert_eq!(key, key.trim());
                        prop_assert!(!key.contains(['=', ':']), "key {:?} holds a delimiter", key);
                    }
                }
            }
            Err(error) => {
                prop_assert!(matches!(error, DecodeError::InvalidSectionHeader { .. }), "unexpected error {:?}", error);

                let number = error.line().unwrap();
                let line = text.split('\n').nth(number - 1).unwrap();
                prop_assert!(line.trim_start().starts_with('['), "line {} is {:?}", number, line);
            }
        }
    }

    #[test]
    fn single_pair_in_default_section(key in key_strategy(), value in plain_value_strategy()) {
        let config = decode(&format!("{key}={value}")).unwrap().unwrap();

        prop_assert_eq!(config.get(DEFAULT_SECTION, &key), Some(value.as_str()));
        prop_assert_eq!(config.len(), 1);
    }

    #[test]
    fn escaped_markers_are_literal(key in key_strategy(), value in "[a-z #;]{0,20}") {
        let escaped = value.replace('#', r"\#").replace(';', r"\;");
        let config = decode(&format!("{key}={escaped}")).unwrap().unwrap();

        prop_assert_eq!(config.get(DEFAULT_SECTION, &key), Some(value.as_str()));
    }

    #[test]
    fn sections_merge_and_last_key_wins(document in document_strategy()) {
        let config = decode(&render(&document, "\n")).unwrap().unwrap();

        prop_assert_eq!(config.into_map(), expected(&document));
    }

    #[test]
    fn crlf_matches_lf(document in document_strategy()) {
        let lf = decode(&render(&document, "\n")).unwrap();
        let crlf = decode(&render(&document, "\r\n")).unwrap();

        prop_assert_eq!(lf, crlf);
    }
}
