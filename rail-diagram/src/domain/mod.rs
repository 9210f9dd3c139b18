//! Domain types for railway diagrams.
//!
//! Leaf value types used by the [`crate::railway::Railway`] aggregate:
//! station identity, pass directions, stations, intervals, and the ruler
//! and forbid templates annotating intervals.

mod direction;
mod error;
mod forbid;
mod interval;
mod ruler;
mod station;
mod station_name;
mod time;

pub use direction::{Direction, InvalidPassedDirection, PassedDirection};
pub use error::RailError;
pub use forbid::{Forbid, ForbidNode};
pub use interval::{IntervalId, RailInterval};
pub use ruler::{Ruler, RulerNode};
pub use station::{RailStation, StationId};
pub use station_name::StationName;
pub use time::{SECONDS_PER_DAY, TimeError, format_hhmm, parse_hhmm, wrapping_secs_between};
