//! Tests for resolving templates into plain strings.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;

use markloc::{
    AttributeFn, ParsedTemplate, ParsingInfo, PluralValue, PluralityDefinition, ResolveWarning,
    ResolvingInfo, SingleToken, TokenKind, TripleToken, constant, identity, substitution,
};

fn angle() -> TripleToken {
    TripleToken::new("<", ":", ">")
}

fn braces() -> TripleToken {
    TripleToken::new("{", "/", "}")
}

fn ordered(index: i64) -> ResolvingInfo<String, String> {
    ResolvingInfo::builder()
        .escape_token("~")
        .ordered(BTreeMap::from([(angle(), index)]))
        .identity(identity())
        .build()
        .unwrap()
}

fn plural(value: impl Into<PluralValue>) -> ResolvingInfo<String, String> {
    ResolvingInfo::builder()
        .escape_token("~")
        .plural_groups(vec![(angle(), value.into())])
        .identity(identity())
        .build()
        .unwrap()
}

#[test]
fn test_plain_text_is_unchanged() {
    assert_eq!(ordered(0).apply("nothing to see"), "nothing to see");
    assert_eq!(ordered(0).apply(""), "");
}

#[test]
fn test_doubled_escape() {
    assert_eq!(ordered(0).apply("a~~b"), "a~b");
}

#[test]
fn test_escaped_token_is_literal() {
    assert_eq!(ordered(0).apply("a ~<b:c> d"), "a <b:c> d");
    assert_eq!(ordered(1).apply("a <b~:c:d>"), "a d");
}

#[test]
fn test_ordered_selection() {
    let template = "the <first:second>";
    assert_eq!(ordered(0).apply(template), "the first");
    assert_eq!(ordered(1).apply(template), "the second");
}

#[test]
fn test_ordered_index_is_clamped() {
    let template = "the <first:second>";
    assert_eq!(ordered(-1).apply(template), "the first");
    assert_eq!(ordered(2).apply(template), "the second");
    assert_eq!(ordered(i64::MAX).apply(template), "the second");
}

#[test]
fn test_single_arm_ordered() {
    assert_eq!(ordered(3).apply("<only>!"), "only!");
}

#[test]
fn test_resolution_is_repeatable() {
    let info = ordered(1);
    let template = info.parse("a <b:c> <d:e>");
    let first = template.resolve(&info);
    assert_eq!(first, "a c e");
    assert_eq!(template.resolve(&info), first);
    assert_eq!(template.resolve(&ordered(0)), "a b d");
}

#[test]
fn test_nested_ordered() {
    let info = ResolvingInfo::<String, String>::builder()
        .ordered(BTreeMap::from([(angle(), 0), (braces(), 1)]))
        .identity(identity())
        .build()
        .unwrap();
    assert_eq!(info.apply("<{a/b}:c>"), "b");
    assert_eq!(info.apply("x <y:z> {<p:q>/<r:s>} w"), "x y r w");
}

#[test]
fn test_plural_override_zones() {
    let template = "||(0)([1→])||there <is:are> items";
    assert_eq!(plural(0).apply(template), "there is items");
    assert_eq!(plural(3).apply(template), "there are items");
}

#[test]
fn test_plural_override_with_ascii_arrow() {
    let template = "||(0)([1->])||<is:are>";
    assert_eq!(plural(0).apply(template), "is");
    assert_eq!(plural(1).apply(template), "are");
}

#[test]
fn test_plural_without_plurality_takes_last_zone() {
    assert_eq!(plural(1).apply("<apple:apples>"), "apples");
    assert_eq!(plural(0).apply("<apple:apples>"), "apples");
}

#[test]
fn test_plural_with_default_plurality() {
    let english: PluralityDefinition = "(1)(*)".parse().unwrap();
    let info = ResolvingInfo::<String, String>::builder()
        .default_plurality(Arc::new(english))
        .plural_groups(vec![(angle(), PluralValue::Int(1))])
        .identity(identity())
        .build()
        .unwrap();
    assert_eq!(info.apply("1 <apple:apples>"), "1 apple");
}

#[test]
fn test_plural_float_value() {
    let template = "||(1)(*)||<one:many>";
    assert_eq!(plural(1.0).apply(template), "one");
    assert_eq!(plural(1.5).apply(template), "many");
}

#[test]
fn test_override_underscore_keeps_default() {
    let french: PluralityDefinition = "(0:1)(*)".parse().unwrap();
    let info = ResolvingInfo::<String, String>::builder()
        .default_plurality(Arc::new(french))
        .plural_groups(vec![
            (angle(), PluralValue::Int(0)),
            (braces(), PluralValue::Int(0)),
        ])
        .identity(identity())
        .build()
        .unwrap();
    assert_eq!(info.apply("||_|(1)(*)||<x:y> {a/b}"), "x b");
}

#[test]
fn test_invalid_override_falls_back() {
    let info = plural(1);
    let template = info.parse("||oops||<x:y>");
    assert_eq!(template.warnings().len(), 1);
    assert_eq!(template.resolve(&info), "y");
}

#[test]
fn test_triple_bar_prefix() {
    assert_eq!(plural(1).apply("|||<x:y>"), "||y");
}

#[test]
fn test_unmatched_delimiter_is_literal() {
    let info = ordered(1);
    let template = info.parse("<a:b> and <c:d");
    assert_eq!(template.warnings().len(), 1);
    assert_eq!(template.resolve(&info), "b and <c:d");
}

#[test]
fn test_invalid_overlap_is_literal() {
    let info = ResolvingInfo::<String, String>::builder()
        .ordered(BTreeMap::from([(angle(), 1)]))
        .output_substitutions(BTreeMap::from([(SingleToken::new("|"), constant("X".to_string()))]))
        .identity(identity())
        .build()
        .unwrap();
    assert_eq!(info.apply("<a|b:c>d|"), "cd|");
}

#[test]
fn test_substitutions() {
    let info = ResolvingInfo::<String, String>::builder()
        .escape_token("~")
        .input_substitutions(BTreeMap::from([(
            SingleToken::new("^"),
            substitution(|s: String| s.to_uppercase()),
        )]))
        .output_substitutions(BTreeMap::from([(
            SingleToken::new("|"),
            constant("Alice".to_string()),
        )]))
        .identity(identity())
        .build()
        .unwrap();
    assert_eq!(info.apply("|name| says ^hi^"), "Alice says HI");
    assert_eq!(info.apply("a~|b|c|"), "a|bAlice");
}

#[test]
fn test_substitution_inside_alternative() {
    let info = ResolvingInfo::<String, String>::builder()
        .ordered(BTreeMap::from([(angle(), 0)]))
        .output_substitutions(BTreeMap::from([(SingleToken::new("|"), constant("Z".to_string()))]))
        .identity(identity())
        .build()
        .unwrap();
    assert_eq!(info.apply("<|x|:y>"), "Z");
    assert_eq!(info.apply("<a|x|b:y> |z|"), "aZb Z");
}

#[test]
fn test_substitution_sees_resolved_content() {
    let info = ResolvingInfo::<String, String>::builder()
        .ordered(BTreeMap::from([(angle(), 1)]))
        .output_substitutions(BTreeMap::from([(
            SingleToken::new("|"),
            substitution(|s: String| format!("[{s}]")),
        )]))
        .identity(identity())
        .build()
        .unwrap();
    assert_eq!(info.apply("|a <b:c> d|"), "[a c d]");
}

#[test]
fn test_missing_value_is_reported_once() {
    let parsing = ParsingInfo::builder()
        .ordered(vec![angle()])
        .output_substitutions(vec![SingleToken::new("|")])
        .build()
        .unwrap();
    let info = ResolvingInfo::<String, String>::builder()
        .output_substitutions(BTreeMap::from([(SingleToken::new("|"), constant("v".to_string()))]))
        .identity(identity())
        .build()
        .unwrap();
    let template = ParsedTemplate::parse("<a:b:c> |x|".to_string(), &parsing);

    let (output, warnings) = template.resolve_with_warnings(&info);
    assert_eq!(output, "<a:b:c> v");
    assert_eq!(
        warnings,
        vec![ResolveWarning::MissingValue {
            kind: TokenKind::Ordered,
            token: "<…:…>".to_string(),
        }]
    );
}

#[test]
fn test_handler_changing_text_stops_resolution() {
    let shouting: AttributeFn<String> =
        Arc::new(|text: &mut String, _: Range<usize>| text.push('!'));
    let info = ResolvingInfo::<String, String>::builder()
        .ordered(BTreeMap::from([(angle(), 0)]))
        .attributes(BTreeMap::from([(SingleToken::new("*"), shouting)]))
        .identity(identity())
        .build()
        .unwrap();

    let (output, warnings) = info.apply_with_warnings("a *b* <c:d>");
    assert_eq!(output, "a b <c:d>!");
    assert_eq!(
        warnings,
        vec![ResolveWarning::TextChanged {
            kind: TokenKind::Attribute,
            token: "*…*".to_string(),
        }]
    );
}
