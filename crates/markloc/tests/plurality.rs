//! Tests for zone selection: ordered arms, zone-list definitions and CLDR
//! rules.

use markloc::plurality::{
    CldrPlurality, IntervalBound, PluralValue, Plurality, PluralityDefinition, ZoneInterval,
    ZoneValue, select_arm, select_zone,
};

fn definition(text: &str) -> PluralityDefinition {
    text.parse().unwrap()
}

#[test]
fn test_select_arm_clamps() {
    assert_eq!(select_arm(0, 2), 0);
    assert_eq!(select_arm(1, 2), 1);
    assert_eq!(select_arm(-1, 2), 0);
    assert_eq!(select_arm(i64::MIN, 2), 0);
    assert_eq!(select_arm(2, 2), 1);
    assert_eq!(select_arm(5, 1), 0);
}

#[test]
fn test_first_matching_zone_wins() {
    let rule = definition("(1)(*)");
    assert_eq!(rule.zone_index(&PluralValue::Int(1), 2), 0);
    assert_eq!(rule.zone_index(&PluralValue::Int(0), 2), 1);
    assert_eq!(rule.zone_index(&PluralValue::Int(42), 2), 1);
}

#[test]
fn test_no_match_uses_last_arm() {
    let rule = definition("(0)(1)");
    assert_eq!(rule.zone_index(&PluralValue::Int(7), 3), 2);
    assert_eq!(PluralityDefinition::matching_nothing().zone_index(&PluralValue::Int(1), 4), 3);
}

#[test]
fn test_multiple_values_per_zone() {
    let french = definition("(0:1)(*)");
    assert_eq!(french.zone_index(&PluralValue::Int(0), 2), 0);
    assert_eq!(french.zone_index(&PluralValue::Int(1), 2), 0);
    assert_eq!(french.zone_index(&PluralValue::Int(2), 2), 1);
}

#[test]
fn test_interval_bounds() {
    let rule = definition("([2→4])(]4→7[)(*)");
    assert_eq!(rule.zone_index(&PluralValue::Int(2), 3), 0);
    assert_eq!(rule.zone_index(&PluralValue::Int(4), 3), 0);
    assert_eq!(rule.zone_index(&PluralValue::Int(5), 3), 1);
    assert_eq!(rule.zone_index(&PluralValue::Int(7), 3), 2);
    assert_eq!(rule.zone_index(&PluralValue::Int(1), 3), 2);
}

#[test]
fn test_open_intervals() {
    let rule = definition("(]→0[)([0→])");
    assert_eq!(rule.zone_index(&PluralValue::Int(-3), 2), 0);
    assert_eq!(rule.zone_index(&PluralValue::Int(0), 2), 1);
    assert_eq!(rule.zone_index(&PluralValue::float(-0.5), 2), 0);
}

#[test]
fn test_ascii_arrow() {
    assert_eq!(definition("([1->3])(*)"), definition("([1→3])(*)"));
}

#[test]
fn test_optional_zones_are_dropped() {
    let rule = definition("(1)([2→4])?(*)");
    assert_eq!(rule.zone_index(&PluralValue::Int(3), 3), 1);
    assert_eq!(rule.zone_index(&PluralValue::Int(7), 3), 2);
    assert_eq!(rule.zone_index(&PluralValue::Int(3), 2), 1);
    assert_eq!(rule.zone_index(&PluralValue::Int(1), 2), 0);
}

#[test]
fn test_float_precision() {
    let rule = definition("(1)(*)");
    let close = PluralValue::Float {
        value: 1.000_001,
        precision: 0.000_01,
    };
    let far = PluralValue::Float {
        value: 1.001,
        precision: 0.000_01,
    };
    assert_eq!(rule.zone_index(&close, 2), 0);
    assert_eq!(rule.zone_index(&far, 2), 1);
    assert_eq!(rule.zone_index(&PluralValue::float(1.5), 2), 1);
}

#[test]
fn test_excluded_bound_rejects_values_within_precision() {
    let rule = definition("(]1→])(*)");
    let near = PluralValue::Float {
        value: 1.005,
        precision: 0.01,
    };
    let past = PluralValue::Float {
        value: 1.02,
        precision: 0.01,
    };
    assert_eq!(rule.zone_index(&near, 2), 1);
    assert_eq!(rule.zone_index(&past, 2), 0);
}

#[test]
fn test_select_zone_clamps() {
    let rule = definition("(0)(1)(*)");
    assert_eq!(select_zone(&PluralValue::Int(5), 2, &rule), 1);
    assert_eq!(select_zone(&PluralValue::Int(0), 2, &rule), 0);
}

#[test]
fn test_parsed_structure() {
    let rule = definition("(*:3)([1→2[)?");
    let zones = rule.zones();
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0].values, vec![ZoneValue::Any, ZoneValue::Int(3)]);
    assert!(!zones[0].optional);
    assert!(zones[1].optional);
    let expected = ZoneInterval::new(
        Some(IntervalBound {
            value: 1.0,
            included: true,
        }),
        Some(IntervalBound {
            value: 2.0,
            included: false,
        }),
    )
    .unwrap();
    assert_eq!(zones[1].values, vec![ZoneValue::Interval(expected)]);
}

#[test]
fn test_display_round_trip() {
    let text = "(0:1)([2→4])?(*)";
    assert_eq!(definition(text).to_string(), text);
}

#[test]
fn test_empty_definition() {
    assert_eq!(definition(""), PluralityDefinition::matching_nothing());
}

#[test]
fn test_parse_errors() {
    let error = "(1)x".parse::<PluralityDefinition>().unwrap_err();
    assert_eq!(error.column, 4);
    assert!(error.message.contains('x'));

    assert!("(1".parse::<PluralityDefinition>().is_err());
    assert!("()".parse::<PluralityDefinition>().is_err());
    assert!("([→])".parse::<PluralityDefinition>().is_err());
}

#[test]
fn test_cldr_english() {
    let english = CldrPlurality::new("en");
    assert_eq!(english.categories().len(), 2);
    assert_eq!(english.zone_index(&PluralValue::Int(1), 2), 0);
    assert_eq!(english.zone_index(&PluralValue::Int(0), 2), 1);
    assert_eq!(english.zone_index(&PluralValue::Int(2), 2), 1);
    assert_eq!(english.zone_index(&PluralValue::float(1.0), 2), 0);
    assert_eq!(english.zone_index(&PluralValue::float(1.5), 2), 1);
}

#[test]
fn test_cldr_russian() {
    let russian = CldrPlurality::new("ru");
    assert_eq!(russian.categories().len(), 4);
    assert_eq!(russian.zone_index(&PluralValue::Int(21), 4), 0);
    assert_eq!(russian.zone_index(&PluralValue::Int(22), 4), 1);
    assert_eq!(russian.zone_index(&PluralValue::Int(25), 4), 2);
    assert_eq!(russian.zone_index(&PluralValue::float(1.5), 4), 3);
}

#[test]
fn test_cldr_french_zero_is_singular() {
    let french = CldrPlurality::new("fr");
    let zones = french.categories().len();
    assert_eq!(french.zone_index(&PluralValue::Int(0), zones), 0);
    assert_eq!(french.zone_index(&PluralValue::Int(2), zones), zones - 1);
}

#[test]
fn test_cldr_language_normalization() {
    assert_eq!(CldrPlurality::new("pt-BR").language(), "pt");
    assert_eq!(CldrPlurality::new("RU").language(), "ru");
    assert_eq!(CldrPlurality::new("xx").language(), "en");
    assert_eq!(CldrPlurality::new("ar").categories().len(), 6);
}
