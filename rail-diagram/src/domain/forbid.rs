//! Forbid templates: per-interval maintenance blackout windows.

use chrono::NaiveTime;

use super::time::wrapping_secs_between;

/// One forbid's blackout window on one interval.
///
/// Either bound may be unset; a node missing either bound is null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForbidNode {
    pub begin: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl ForbidNode {
    /// A window from `begin` to `end`, possibly crossing midnight.
    pub fn new(begin: NaiveTime, end: NaiveTime) -> Self {
        Self {
            begin: Some(begin),
            end: Some(end),
        }
    }

    /// Returns true unless both bounds are set.
    pub fn is_null(&self) -> bool {
        self.begin.is_none() || self.end.is_none()
    }

    /// Window length in seconds, wrapping past midnight.
    ///
    /// # Examples
    ///
    /// ```
    /// use rail_diagram::domain::{ForbidNode, parse_hhmm};
    ///
    /// let node = ForbidNode::new(parse_hhmm("23:00").unwrap(), parse_hhmm("01:30").unwrap());
    /// assert_eq!(node.duration_sec(), Some(9000));
    /// assert_eq!(node.duration_min(), Some(150));
    /// ```
    pub fn duration_sec(&self) -> Option<i64> {
        Some(wrapping_secs_between(self.begin?, self.end?))
    }

    /// Window length in whole minutes.
    pub fn duration_min(&self) -> Option<i64> {
        self.duration_sec().map(|s| s / 60)
    }

    /// The window covering this interval followed by `next`.
    pub fn merged(&self, next: &ForbidNode) -> ForbidNode {
        ForbidNode {
            begin: self.begin,
            end: next.end,
        }
    }
}

/// A blackout-window template.
///
/// A railway conventionally carries at most two of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forbid {
    /// Whether down and up windows are allowed to differ.
    pub different: bool,
    /// Draw the windows on the down side of the diagram.
    pub down_show: bool,
    /// Draw the windows on the up side of the diagram.
    pub up_show: bool,
    pub(crate) index: usize,
}

impl Forbid {
    pub(crate) fn new(different: bool, index: usize) -> Self {
        Self {
            different,
            down_show: false,
            up_show: false,
            index,
        }
    }

    /// Position in the railway's forbid list, and key into every
    /// interval's forbid nodes.
    pub fn index(&self) -> usize {
        self.index
    }
}
