//! Arm selection for multi-arm directives.
//!
//! Ordered alternatives pick an arm by index; plural groups pick a zone by
//! running a numeric value through a [`Plurality`]. Both clamp the result
//! into the arms the text actually provides.

mod cldr;
mod definition;
mod interval;

use std::fmt::Debug;

pub use cldr::CldrPlurality;
pub use definition::{PluralityDefinition, PluralityParseError, Zone, ZoneValue};
pub use interval::{IntervalBound, ZoneInterval};

/// Tolerance used when a fractional value is compared to a zone value.
pub const DEFAULT_FLOAT_PRECISION: f64 = 0.00001;

/// Maps a numeric value to a zone index.
///
/// Implemented by [`PluralityDefinition`] (explicit zone lists, including
/// the per-template overrides) and by [`CldrPlurality`] (CLDR rules).
pub trait Plurality: Debug + Send + Sync {
    /// Returns the zone to use for `value` when the text has `zone_count`
    /// zones. Callers clamp the result, so implementations may return an
    /// index past the end.
    fn zone_index(&self, value: &PluralValue, zone_count: usize) -> usize;
}

/// A numeric value driving a plural group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PluralValue {
    Int(i64),
    /// A fractional value compared to zone values within `precision`.
    Float { value: f64, precision: f64 },
}

impl PluralValue {
    /// Creates a fractional value with the default precision.
    pub fn float(value: f64) -> Self {
        PluralValue::Float {
            value,
            precision: DEFAULT_FLOAT_PRECISION,
        }
    }

    /// Returns the value together with the precision to compare it with.
    pub fn as_f64_with_precision(&self) -> (f64, f64) {
        match self {
            PluralValue::Int(n) => (*n as f64, 0.0),
            PluralValue::Float { value, precision } => (*value, *precision),
        }
    }
}

impl From<i64> for PluralValue {
    fn from(n: i64) -> Self {
        PluralValue::Int(n)
    }
}

impl From<i32> for PluralValue {
    fn from(n: i32) -> Self {
        PluralValue::Int(i64::from(n))
    }
}

impl From<u32> for PluralValue {
    fn from(n: u32) -> Self {
        PluralValue::Int(i64::from(n))
    }
}

impl From<usize> for PluralValue {
    fn from(n: usize) -> Self {
        PluralValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for PluralValue {
    fn from(value: f64) -> Self {
        PluralValue::float(value)
    }
}

/// Picks the active arm of an ordered alternative.
///
/// A negative index selects the first arm, an index past the end the last.
///
/// # Example
///
/// ```
/// use markloc::plurality::select_arm;
///
/// assert_eq!(select_arm(1, 3), 1);
/// assert_eq!(select_arm(-1, 3), 0);
/// assert_eq!(select_arm(7, 3), 2);
/// ```
pub fn select_arm(desired: i64, arm_count: usize) -> usize {
    let last = arm_count.saturating_sub(1);
    usize::try_from(desired).map_or(0, |index| index.min(last))
}

/// Picks the active zone of a plural group, clamped to the zones present.
pub fn select_zone(value: &PluralValue, zone_count: usize, plurality: &dyn Plurality) -> usize {
    plurality
        .zone_index(value, zone_count)
        .min(zone_count.saturating_sub(1))
}
