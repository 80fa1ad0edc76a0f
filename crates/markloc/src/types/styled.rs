//! Styled text: a string annotated with contiguous attribute runs.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Range;
use std::str::FromStr;

use bon::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Text;

/// An RGB colour.
///
/// # Example
///
/// ```
/// use markloc::Color;
///
/// let red: Color = "#ff0000".parse().unwrap();
/// assert_eq!(red, Color::rgb(255, 0, 0));
/// assert_eq!(red.to_string(), "#ff0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    /// Creates a colour from its components.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Error returned when a colour string is not `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour '{input}': expected #rrggbb")]
pub struct ColorParseError {
    pub input: String,
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ColorParseError {
            input: s.to_string(),
        };
        let hex = s.strip_prefix('#').ok_or_else(error)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(error());
        }
        let component =
            |range: Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| error());
        Ok(Self::rgb(component(0..2)?, component(2..4)?, component(4..6)?))
    }
}

/// A font family and point size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: u32,
}

impl Font {
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// The attributes carried by one run of a [`StyledText`].
///
/// `custom` holds caller-defined attributes that have no dedicated field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Builder, Serialize, Deserialize)]
pub struct Attributes {
    #[builder(default)]
    pub bold: bool,
    #[builder(default)]
    pub italic: bool,
    #[builder(default)]
    pub underline: bool,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub font: Option<Font>,
    #[builder(into)]
    pub link: Option<String>,
    #[builder(default)]
    pub custom: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Run {
    len: usize,
    attributes: Attributes,
}

/// A string whose every byte belongs to exactly one attribute run.
///
/// Runs are kept normalised (no empty runs, no two adjacent runs with equal
/// attributes), so two styled texts compare equal exactly when they render
/// the same.
///
/// # Example
///
/// ```
/// use markloc::{Attributes, StyledText};
///
/// let mut text = StyledText::from("the test");
/// text.update_attributes(4..8, |a| a.bold = true);
///
/// let mut expected = StyledText::from("the ");
/// expected.push(StyledText::new("test", Attributes::builder().bold(true).build()));
/// assert_eq!(text, expected);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    text: String,
    runs: Vec<Run>,
}

impl StyledText {
    /// Creates a styled text with the same attributes over all of `text`.
    pub fn new(text: impl Into<String>, attributes: Attributes) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![Run {
                len: text.len(),
                attributes,
            }]
        };
        Self { text, runs }
    }

    /// Returns the plain string.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Iterates over the attribute runs with their byte ranges.
    pub fn runs(&self) -> impl Iterator<Item = (Range<usize>, &Attributes)> {
        self.runs.iter().scan(0, |start, run| {
            let range = *start..*start + run.len;
            *start = range.end;
            Some((range, &run.attributes))
        })
    }

    /// Returns the attributes of the byte at `offset`.
    pub fn attributes_at(&self, offset: usize) -> Option<&Attributes> {
        self.runs()
            .find(|(range, _)| range.contains(&offset))
            .map(|(_, attributes)| attributes)
    }

    /// Applies `change` to the attributes of every run inside `range`.
    pub fn update_attributes(
        &mut self,
        range: Range<usize>,
        mut change: impl FnMut(&mut Attributes),
    ) {
        if range.is_empty() {
            return;
        }
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        for run in &mut self.runs[first..last] {
            change(&mut run.attributes);
        }
        self.normalize();
    }

    /// Appends another styled text.
    pub fn push(&mut self, other: StyledText) {
        self.text.push_str(&other.text);
        self.runs.extend(other.runs);
        self.normalize();
    }

    /// Makes sure a run starts at `offset` and returns that run's index.
    fn split_at(&mut self, offset: usize) -> usize {
        let mut start = 0;
        for idx in 0..self.runs.len() {
            let len = self.runs[idx].len;
            if offset == start {
                return idx;
            }
            if offset < start + len {
                let tail = Run {
                    len: start + len - offset,
                    attributes: self.runs[idx].attributes.clone(),
                };
                self.runs[idx].len = offset - start;
                self.runs.insert(idx + 1, tail);
                return idx + 1;
            }
            start += len;
        }
        self.runs.len()
    }

    fn normalize(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.len == 0 {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.attributes == run.attributes => last.len += run.len,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

impl Text for StyledText {
    fn plain(&self) -> &str {
        &self.text
    }

    fn slice(&self, range: Range<usize>) -> Self {
        let runs = self
            .runs()
            .filter_map(|(run_range, attributes)| {
                let start = run_range.start.max(range.start);
                let end = run_range.end.min(range.end);
                (start < end).then(|| Run {
                    len: end - start,
                    attributes: attributes.clone(),
                })
            })
            .collect();
        Self {
            text: self.text[range].to_string(),
            runs,
        }
    }

    fn delete(&mut self, range: Range<usize>) {
        self.splice(range, StyledText::default());
    }

    fn splice(&mut self, range: Range<usize>, replacement: Self) -> String {
        let StyledText { text, runs } = replacement;
        let first = self.split_at(range.start);
        let last = self.split_at(range.end);
        self.runs.splice(first..last, runs);
        self.text.replace_range(range, &text);
        self.normalize();
        text
    }
}

impl Display for StyledText {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        StyledText::new(text, Attributes::default())
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        StyledText::new(text, Attributes::default())
    }
}
