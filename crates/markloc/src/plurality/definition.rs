//! Zone-list plurality definitions and their textual form.
//!
//! A definition is a list of zones, each a list of values: `(1)(*)` is the
//! English rule, `(0:1)(*)` the French one, `(1)([2→4])?(*)` a rule with an
//! optional middle zone. Parsing uses winnow, like the template parser.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use thiserror::Error;
use winnow::ascii::{dec_int, float};
use winnow::combinator::{alt, delimited, opt, repeat, separated};
use winnow::prelude::*;
use winnow::token::one_of;

use super::interval::{IntervalBound, ZoneInterval};
use super::{PluralValue, Plurality};

/// An error in the textual form of a plurality definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid plurality definition at column {column}: {message}")]
pub struct PluralityParseError {
    pub column: usize,
    pub message: String,
}

/// One value of a zone.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneValue {
    /// `*`, matches everything.
    Any,
    /// An exact integer.
    Int(i64),
    Interval(ZoneInterval),
}

impl ZoneValue {
    pub fn matches(&self, value: &PluralValue) -> bool {
        match (self, value) {
            (ZoneValue::Any, _) => true,
            (ZoneValue::Int(n), PluralValue::Int(v)) => n == v,
            (ZoneValue::Int(n), PluralValue::Float { value, precision }) => {
                (value - *n as f64).abs() <= *precision
            }
            (ZoneValue::Interval(interval), _) => interval.matches(value),
        }
    }
}

/// A zone: matches when any of its values does.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub values: Vec<ZoneValue>,
    /// Optional zones are dropped, last first, when a text has fewer arms
    /// than the definition has zones.
    pub optional: bool,
}

impl Zone {
    pub fn matches(&self, value: &PluralValue) -> bool {
        self.values.iter().any(|v| v.matches(value))
    }
}

/// An ordered list of zones; the first matching zone wins. When no zone
/// matches, the last arm of the text is used.
///
/// # Example
///
/// ```
/// use markloc::plurality::{PluralityDefinition, Plurality, PluralValue};
///
/// let english: PluralityDefinition = "(1)(*)".parse().unwrap();
/// assert_eq!(english.zone_index(&PluralValue::Int(1), 2), 0);
/// assert_eq!(english.zone_index(&PluralValue::Int(4), 2), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluralityDefinition {
    zones: Vec<Zone>,
}

impl PluralityDefinition {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    /// A definition without zones: every value selects the last arm.
    pub fn matching_nothing() -> Self {
        Self::default()
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }
}

impl Plurality for PluralityDefinition {
    fn zone_index(&self, value: &PluralValue, zone_count: usize) -> usize {
        let mut zones: Vec<&Zone> = self.zones.iter().collect();
        while zones.len() > zone_count {
            match zones.iter().rposition(|zone| zone.optional) {
                Some(idx) => {
                    zones.remove(idx);
                }
                None => break,
            }
        }
        zones
            .iter()
            .position(|zone| zone.matches(value))
            .unwrap_or(zone_count.saturating_sub(1))
    }
}

impl FromStr for PluralityDefinition {
    type Err = PluralityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut remaining = s;
        let zones: Vec<Zone> = repeat(0.., zone)
            .parse_next(&mut remaining)
            .map_err(|e| PluralityParseError {
                column: column(s, remaining),
                message: format!("parse error: {e}"),
            })?;
        match remaining.chars().next() {
            None => Ok(Self { zones }),
            Some(c) => Err(PluralityParseError {
                column: column(s, remaining),
                message: format!("unexpected character '{c}'"),
            }),
        }
    }
}

impl Display for PluralityDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for zone in &self.zones {
            write!(f, "(")?;
            for (idx, value) in zone.values.iter().enumerate() {
                if idx > 0 {
                    write!(f, ":")?;
                }
                match value {
                    ZoneValue::Any => write!(f, "*")?,
                    ZoneValue::Int(n) => write!(f, "{n}")?,
                    ZoneValue::Interval(interval) => write!(f, "{interval}")?,
                }
            }
            write!(f, ")")?;
            if zone.optional {
                write!(f, "?")?;
            }
        }
        Ok(())
    }
}

fn column(original: &str, remaining: &str) -> usize {
    original[..original.len() - remaining.len()].chars().count() + 1
}

/// `(value:value…)` optionally followed by `?`.
fn zone(input: &mut &str) -> ModalResult<Zone> {
    let values: Vec<ZoneValue> =
        delimited('(', separated(1.., zone_value, ':'), ')').parse_next(input)?;
    let optional = opt('?').parse_next(input)?.is_some();
    Ok(Zone { values, optional })
}

fn zone_value(input: &mut &str) -> ModalResult<ZoneValue> {
    alt((
        '*'.value(ZoneValue::Any),
        interval.map(ZoneValue::Interval),
        dec_int.map(ZoneValue::Int),
    ))
    .parse_next(input)
}

/// `[a→b]`, with either bound optional; `]` on the start side and `[` on
/// the end side exclude the bound.
fn interval(input: &mut &str) -> ModalResult<ZoneInterval> {
    (
        one_of(['[', ']']),
        opt(float),
        alt(("→", "->")),
        opt(float),
        one_of(['[', ']']),
    )
        .verify_map(
            |(open, start, _, end, close): (char, Option<f64>, &str, Option<f64>, char)| {
                ZoneInterval::new(
                    start.map(|value| IntervalBound {
                        value,
                        included: open == '[',
                    }),
                    end.map(|value| IntervalBound {
                        value,
                        included: close == ']',
                    }),
                )
            },
        )
        .parse_next(input)
}
