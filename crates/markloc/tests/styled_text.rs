//! Tests for styled text editing and attribute changes.

use std::collections::BTreeMap;

use markloc::{
    AttributeChange, Attributes, AttributesChanges, Color, Font, StyledText, Text,
};

fn bold() -> Attributes {
    Attributes::builder().bold(true).build()
}

fn sample() -> StyledText {
    let mut text = StyledText::from("one ");
    text.push(StyledText::new("two", bold()));
    text.push(StyledText::from(" three"));
    text
}

#[test]
fn test_runs_are_normalized() {
    let mut text = StyledText::from("ab");
    text.push(StyledText::from("cd"));
    assert_eq!(text.runs().count(), 1);
    assert_eq!(StyledText::from("").runs().count(), 0);
}

#[test]
fn test_runs_ranges() {
    let runs: Vec<_> = sample().runs().map(|(range, a)| (range, a.bold)).collect();
    assert_eq!(runs, vec![(0..4, false), (4..7, true), (7..13, false)]);
}

#[test]
fn test_slice_keeps_attributes() {
    let slice = sample().slice(2..9);
    assert_eq!(slice.plain(), "e two t");
    let mut expected = StyledText::from("e ");
    expected.push(StyledText::new("two", bold()));
    expected.push(StyledText::from(" t"));
    assert_eq!(slice, expected);
}

#[test]
fn test_delete_across_runs() {
    let mut text = sample();
    text.delete(3..8);
    assert_eq!(text, StyledText::from("onethree"));
}

#[test]
fn test_splice_inserts_runs() {
    let mut text = sample();
    let inserted = text.splice(4..7, StyledText::from("2"));
    assert_eq!(inserted, "2");
    assert_eq!(text, StyledText::from("one 2 three"));
}

#[test]
fn test_splice_empty_range() {
    let mut text = StyledText::from("ac");
    text.splice(1..1, StyledText::new("b", bold()));
    assert_eq!(text.attributes_at(1), Some(&bold()));
    assert_eq!(text.plain(), "abc");
}

#[test]
fn test_string_text() {
    let mut text = String::from("hello world");
    assert_eq!(text.slice(6..11), "world");
    text.delete(5..11);
    assert_eq!(text.plain(), "hello");
}

#[test]
fn test_attribute_changes() {
    let red = Color::rgb(255, 0, 0);
    let changes = AttributesChanges::new(vec![
        AttributeChange::SetItalic,
        AttributeChange::SetForeground(red),
        AttributeChange::AddLink("https://example.com".to_string()),
        AttributeChange::SetCustom {
            key: "role".to_string(),
            value: "name".to_string(),
        },
    ]);
    let mut text = StyledText::from("hello");
    changes.apply(&mut text, 1..3);

    let attributes = text.attributes_at(1).unwrap();
    assert!(attributes.italic);
    assert_eq!(attributes.foreground, Some(red));
    assert_eq!(attributes.link.as_deref(), Some("https://example.com"));
    assert_eq!(
        attributes.custom,
        BTreeMap::from([("role".to_string(), "name".to_string())])
    );
    assert_eq!(text.attributes_at(0), Some(&Attributes::default()));
    assert_eq!(text.runs().count(), 3);
}

#[test]
fn test_remove_changes() {
    let mut text = sample();
    AttributesChanges::single(AttributeChange::RemoveBold).apply(&mut text, 0..13);
    assert_eq!(text, StyledText::from("one two three"));
}

#[test]
fn test_font_change_preserves_size() {
    let mut attributes = Attributes::builder().font(Font::new("Helvetica", 14)).build();
    AttributeChange::ChangeFont {
        font: Font::new("Courier", 10),
        preserve_size: true,
    }
    .apply_to(&mut attributes);
    assert_eq!(attributes.font, Some(Font::new("Courier", 14)));

    AttributeChange::ChangeFont {
        font: Font::new("Courier", 10),
        preserve_size: false,
    }
    .apply_to(&mut attributes);
    assert_eq!(attributes.font, Some(Font::new("Courier", 10)));
}

#[test]
fn test_color_parsing() {
    assert_eq!("#00ff7f".parse::<Color>(), Ok(Color::rgb(0, 255, 127)));
    assert!("00ff7f".parse::<Color>().is_err());
    assert!("#00ff7".parse::<Color>().is_err());
    assert!("#gg0000".parse::<Color>().is_err());
}

#[test]
fn test_attributes_serialize() {
    let json = serde_json::to_value(bold()).unwrap();
    assert_eq!(json["bold"], true);
    assert_eq!(json["foreground"], serde_json::Value::Null);
}
