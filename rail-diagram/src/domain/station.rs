//! Railway station type.

use generational_arena::Index;

use super::{Direction, IntervalId, PassedDirection, StationName};

/// Stable handle of a station owned by a [`crate::railway::Railway`].
///
/// Handles survive insertion and removal of other stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub(crate) Index);

/// A station on a railway, with its per-station attributes.
///
/// The four interval links are maintained by the owning railway; they are
/// read-only from outside the crate.
#[derive(Debug, Clone)]
pub struct RailStation {
    pub(crate) name: StationName,
    /// Linear position along the line (km).
    pub mile: f64,
    /// Position measured for the up direction, when it differs from `mile`.
    pub counter: Option<f64>,
    /// Display importance; lower is more important.
    pub level: i32,
    pub(crate) direction: PassedDirection,
    /// Whether the station is drawn on the diagram.
    pub show: bool,
    /// Computed vertical coordinate, cleared on relayout.
    pub y_value: Option<f64>,
    pub(crate) down_prev: Option<IntervalId>,
    pub(crate) down_next: Option<IntervalId>,
    pub(crate) up_prev: Option<IntervalId>,
    pub(crate) up_next: Option<IntervalId>,
}

impl RailStation {
    /// Create an unlinked station.
    pub fn new(
        name: StationName,
        mile: f64,
        level: i32,
        counter: Option<f64>,
        direction: PassedDirection,
    ) -> Self {
        Self {
            name,
            mile,
            counter,
            level,
            direction,
            show: true,
            y_value: None,
            down_prev: None,
            down_next: None,
            up_prev: None,
            up_next: None,
        }
    }

    /// The station's exact name.
    pub fn name(&self) -> &StationName {
        &self.name
    }

    /// Which directions pass this station.
    pub fn direction(&self) -> PassedDirection {
        self.direction
    }

    /// Returns true if down trains pass this station.
    pub fn is_down_via(&self) -> bool {
        self.direction.is_down_via()
    }

    /// Returns true if up trains pass this station.
    pub fn is_up_via(&self) -> bool {
        self.direction.is_up_via()
    }

    /// Returns true if trains running in `dir` pass this station.
    pub fn is_via(&self, dir: Direction) -> bool {
        self.direction.is_via(dir)
    }

    /// Mileage as seen by trains running in `dir`.
    ///
    /// Up-direction readings use the counter when one is recorded.
    pub fn dir_mile(&self, dir: Direction) -> f64 {
        match (dir, self.counter) {
            (Direction::Up, Some(counter)) => counter,
            _ => self.mile,
        }
    }

    /// The interval arriving at this station in direction `dir`.
    pub fn dir_prev(&self, dir: Direction) -> Option<IntervalId> {
        match dir {
            Direction::Down => self.down_prev,
            Direction::Up => self.up_prev,
        }
    }

    /// The interval leaving this station in direction `dir`.
    pub fn dir_next(&self, dir: Direction) -> Option<IntervalId> {
        match dir {
            Direction::Down => self.down_next,
            Direction::Up => self.up_next,
        }
    }

    pub(crate) fn set_dir_prev(&mut self, dir: Direction, interval: Option<IntervalId>) {
        match dir {
            Direction::Down => self.down_prev = interval,
            Direction::Up => self.up_prev = interval,
        }
    }

    pub(crate) fn set_dir_next(&mut self, dir: Direction, interval: Option<IntervalId>) {
        match dir {
            Direction::Down => self.down_next = interval,
            Direction::Up => self.up_next = interval,
        }
    }

    /// A copy with the interval links and layout cleared, ready to be
    /// inserted into another railway.
    pub fn detached(&self) -> Self {
        let mut copy = Self::new(
            self.name.clone(),
            self.mile,
            self.level,
            self.counter,
            self.direction,
        );
        copy.show = self.show;
        copy
    }

    /// Counter rendered for tables: the value, or `-` when absent.
    pub fn counter_str(&self) -> String {
        match self.counter {
            Some(c) => format!("{c:.3}"),
            None => "-".to_string(),
        }
    }
}
