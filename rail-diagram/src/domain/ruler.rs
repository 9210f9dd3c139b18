//! Ruler templates: per-interval running times.

/// One ruler's running-time data for one interval, in seconds.
///
/// `interval` is the pass-to-pass running time; `start` and `stop` are the
/// extra time added when the train starts from / stops at the interval's
/// endpoints. A node whose `interval` is zero is null (not yet filled in).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RulerNode {
    pub interval: u32,
    pub start: u32,
    pub stop: u32,
}

impl RulerNode {
    /// A node with the given running time and allowances.
    pub fn new(interval: u32, start: u32, stop: u32) -> Self {
        Self {
            interval,
            start,
            stop,
        }
    }

    /// Returns true if the node carries no running time.
    pub fn is_null(&self) -> bool {
        self.interval == 0
    }

    /// The node covering this interval followed by `next`.
    ///
    /// Running times add; a null on either side, or a sum past `u32::MAX`,
    /// makes the result null.
    pub fn merged(&self, next: &RulerNode) -> RulerNode {
        let interval = if self.is_null() || next.is_null() {
            0
        } else {
            self.interval.checked_add(next.interval).unwrap_or(0)
        };
        RulerNode {
            interval,
            start: self.start,
            stop: next.stop,
        }
    }
}

/// A named running-time template.
///
/// The node data lives in the railway's intervals, keyed by `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruler {
    pub(crate) name: String,
    /// Whether down and up running times are allowed to differ.
    pub different: bool,
    pub(crate) index: usize,
}

impl Ruler {
    pub(crate) fn new(name: String, different: bool, index: usize) -> Self {
        Self {
            name,
            different,
            index,
        }
    }

    /// The ruler's name, unique within its railway.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in the railway's ruler list, and key into every interval's
    /// ruler nodes.
    pub fn index(&self) -> usize {
        self.index
    }
}
