use std::fmt::{Display, Formatter, Result as FmtResult};

use super::PluralValue;

/// One end of a [`ZoneInterval`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalBound {
    pub value: f64,
    pub included: bool,
}

/// A numeric interval zone value, such as `[2→4]` or `]1→`.
///
/// At least one bound is present, and the start never exceeds the end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneInterval {
    start: Option<IntervalBound>,
    end: Option<IntervalBound>,
}

impl ZoneInterval {
    /// Returns `None` when both bounds are missing or the start is after
    /// the end.
    pub fn new(start: Option<IntervalBound>, end: Option<IntervalBound>) -> Option<Self> {
        match (start, end) {
            (None, None) => None,
            (Some(s), Some(e)) if s.value > e.value => None,
            _ => Some(Self { start, end }),
        }
    }

    pub fn start(&self) -> Option<IntervalBound> {
        self.start
    }

    pub fn end(&self) -> Option<IntervalBound> {
        self.end
    }

    /// Checks whether `value` lies in the interval. Included bounds are
    /// widened by the value's precision, excluded ones narrowed by it.
    ///
    /// An excluded bound rejects values within `precision` of it: with a
    /// precision of `0.01`, `]1→]` rejects `1.005` and accepts `1.02`.
    /// Definitions written for engines that accept values within precision
    /// of an excluded bound need that bound moved by the precision.
    pub fn matches(&self, value: &PluralValue) -> bool {
        let (value, precision) = value.as_f64_with_precision();
        if let Some(start) = self.start {
            let delta = value - start.value;
            let inside = if start.included {
                delta >= -precision
            } else {
                delta > precision
            };
            if !inside {
                return false;
            }
        }
        if let Some(end) = self.end {
            let delta = value - end.value;
            let inside = if end.included {
                delta <= precision
            } else {
                delta < -precision
            };
            if !inside {
                return false;
            }
        }
        true
    }
}

impl Display for ZoneInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.start {
            Some(start) => write!(f, "{}{}", if start.included { '[' } else { ']' }, start.value)?,
            None => write!(f, "[")?,
        }
        write!(f, "→")?;
        match self.end {
            Some(end) => write!(f, "{}{}", end.value, if end.included { ']' } else { '[' }),
            None => write!(f, "]"),
        }
    }
}
