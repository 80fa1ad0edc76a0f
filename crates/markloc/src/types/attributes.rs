//! Descriptions of attribute changes applied by attribute-span directives.

use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Attributes, Color, Font, StyledText};
use crate::resolver::AttributeFn;

/// One change to the attributes of a range of styled text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeChange {
    SetBold,
    RemoveBold,
    SetItalic,
    RemoveItalic,
    AddUnderline,
    RemoveUnderline,
    SetForeground(Color),
    SetBackground(Color),
    /// Replaces the font; `preserve_size` keeps the size already present.
    ChangeFont { font: Font, preserve_size: bool },
    AddLink(String),
    /// Sets a caller-defined attribute.
    SetCustom { key: String, value: String },
}

impl AttributeChange {
    /// Applies this change to one set of attributes.
    pub fn apply_to(&self, attributes: &mut Attributes) {
        match self {
            AttributeChange::SetBold => attributes.bold = true,
            AttributeChange::RemoveBold => attributes.bold = false,
            AttributeChange::SetItalic => attributes.italic = true,
            AttributeChange::RemoveItalic => attributes.italic = false,
            AttributeChange::AddUnderline => attributes.underline = true,
            AttributeChange::RemoveUnderline => attributes.underline = false,
            AttributeChange::SetForeground(color) => attributes.foreground = Some(*color),
            AttributeChange::SetBackground(color) => attributes.background = Some(*color),
            AttributeChange::ChangeFont {
                font,
                preserve_size,
            } => {
                let size = match (&attributes.font, preserve_size) {
                    (Some(current), true) => current.size,
                    _ => font.size,
                };
                attributes.font = Some(Font::new(font.family.clone(), size));
            }
            AttributeChange::AddLink(url) => attributes.link = Some(url.clone()),
            AttributeChange::SetCustom { key, value } => {
                attributes.custom.insert(key.clone(), value.clone());
            }
        }
    }
}

/// An ordered list of attribute changes applied together over a range.
///
/// # Example
///
/// ```
/// use markloc::{AttributeChange, AttributesChanges, StyledText};
///
/// let changes = AttributesChanges::new(vec![
///     AttributeChange::SetBold,
///     AttributeChange::AddUnderline,
/// ]);
/// let mut text = StyledText::from("hello");
/// changes.apply(&mut text, 0..5);
///
/// let attributes = text.attributes_at(0).unwrap();
/// assert!(attributes.bold && attributes.underline);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributesChanges {
    changes: Vec<AttributeChange>,
}

impl AttributesChanges {
    pub fn new(changes: Vec<AttributeChange>) -> Self {
        Self { changes }
    }

    /// A description with a single change.
    pub fn single(change: AttributeChange) -> Self {
        Self::new(vec![change])
    }

    pub fn changes(&self) -> &[AttributeChange] {
        &self.changes
    }

    /// Applies every change, in order, over `range`.
    pub fn apply(&self, text: &mut StyledText, range: Range<usize>) {
        text.update_attributes(range, |attributes| {
            for change in &self.changes {
                change.apply_to(attributes);
            }
        });
    }

    /// Converts this description into an attribute-span handler for a
    /// [`crate::ResolvingInfo`].
    pub fn into_handler(self) -> AttributeFn<StyledText> {
        Arc::new(move |text: &mut StyledText, range: Range<usize>| self.apply(text, range))
    }
}

impl From<AttributeChange> for AttributesChanges {
    fn from(change: AttributeChange) -> Self {
        Self::single(change)
    }
}
