//! Tests for token table validation.

use std::collections::BTreeMap;

use markloc::{
    ConfigError, ParsingInfo, PluralValue, ResolvingInfo, SingleToken, TokenKind, TripleToken,
    constant, identity,
};

#[test]
fn test_valid_tables() {
    let info = ParsingInfo::builder()
        .escape_token("~")
        .ordered(vec![TripleToken::new("{", "₋", "}")])
        .plural_groups(vec![TripleToken::new("<", ":", ">")])
        .input_substitutions(vec![SingleToken::new("^")])
        .output_substitutions(vec![SingleToken::new("|")])
        .attributes(vec![SingleToken::new("*"), SingleToken::new("_")])
        .build()
        .unwrap();
    assert_eq!(info.escape_token(), Some("~"));
    assert_eq!(info.attributes().len(), 2);
}

#[test]
fn test_empty_escape_disables_escaping() {
    let info = ParsingInfo::builder().escape_token("").build().unwrap();
    assert_eq!(info.escape_token(), None);
    assert_eq!(ParsingInfo::builder().build().unwrap().escape_token(), None);
}

#[test]
fn test_same_outer_delimiter_is_allowed() {
    assert!(
        ParsingInfo::builder()
            .ordered(vec![TripleToken::new("|", ":", "|")])
            .build()
            .is_ok()
    );
}

#[test]
fn test_empty_delimiter() {
    let result = ParsingInfo::builder()
        .input_substitutions(vec![SingleToken::new("")])
        .build();
    assert_eq!(
        result,
        Err(ConfigError::EmptyDelimiter {
            kind: TokenKind::InputSubstitution,
            token: "…".to_string(),
        })
    );

    let result = ParsingInfo::builder()
        .plural_groups(vec![TripleToken::new("<", "", ">")])
        .build();
    assert!(matches!(result, Err(ConfigError::EmptyDelimiter { kind: TokenKind::Plural, .. })));
}

#[test]
fn test_ambiguous_interior() {
    let result = ParsingInfo::builder()
        .ordered(vec![TripleToken::new("<", "<", ">")])
        .build();
    assert_eq!(
        result,
        Err(ConfigError::AmbiguousInterior {
            token: "<…<…>".to_string(),
        })
    );
}

#[test]
fn test_conflicting_delimiters() {
    let result = ParsingInfo::builder()
        .ordered(vec![TripleToken::new("<", ":", ">")])
        .plural_groups(vec![TripleToken::new("[", ":", "]")])
        .build();
    assert!(matches!(
        result,
        Err(ConfigError::ConflictingDelimiter { delimiter, .. }) if delimiter == ":"
    ));

    let result = ParsingInfo::builder()
        .output_substitutions(vec![SingleToken::new("|"), SingleToken::new("|")])
        .build();
    assert!(matches!(result, Err(ConfigError::ConflictingDelimiter { .. })));
}

#[test]
fn test_duplicate_plural_group() {
    let token = TripleToken::new("<", ":", ">");
    let result = ResolvingInfo::<String, String>::builder()
        .plural_groups(vec![
            (token.clone(), PluralValue::Int(1)),
            (token, PluralValue::Int(2)),
        ])
        .identity(identity())
        .build();
    assert!(matches!(result, Err(ConfigError::DuplicatePluralGroup { .. })));
}

#[test]
fn test_escape_conflict() {
    let result = ParsingInfo::builder()
        .escape_token("~")
        .output_substitutions(vec![SingleToken::new("~|")])
        .build();
    assert_eq!(
        result,
        Err(ConfigError::EscapeConflict {
            escape: "~".to_string(),
            token: "~|…~|".to_string(),
        })
    );

    let result = ParsingInfo::builder()
        .escape_token("*")
        .attributes(vec![SingleToken::new("*")])
        .build();
    assert!(matches!(result, Err(ConfigError::EscapeConflict { .. })));
}

#[test]
fn test_resolving_info_checks_its_tokens() {
    let result = ResolvingInfo::<String, String>::builder()
        .input_substitutions(BTreeMap::from([(SingleToken::new("*"), constant(String::new()))]))
        .output_substitutions(BTreeMap::from([(SingleToken::new("*"), constant(String::new()))]))
        .identity(identity())
        .build();
    assert!(matches!(result, Err(ConfigError::ConflictingDelimiter { .. })));
}

#[test]
fn test_resolving_info_exposes_parsing_info() {
    let token = TripleToken::new("<", ":", ">");
    let info = ResolvingInfo::<String, String>::builder()
        .escape_token("~")
        .ordered(BTreeMap::from([(token.clone(), 1)]))
        .identity(identity())
        .build()
        .unwrap();
    assert_eq!(info.parsing_info().ordered(), [token.clone()]);
    assert_eq!(info.ordered_value(&token), Some(1));
    assert_eq!(info.plural_value(&token), None);
}

#[test]
fn test_config_error_messages() {
    let error = ConfigError::ConflictingDelimiter {
        delimiter: "|".to_string(),
        first: "output substitution '|…|'".to_string(),
        second: "attribute span '|…|'".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "delimiter '|' is used by both output substitution '|…|' and attribute span '|…|'"
    );
}
