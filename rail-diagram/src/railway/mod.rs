//! The railway aggregate.
//!
//! A [`Railway`] owns an ordered sequence of stations, the intervals
//! linking them into a down chain and an up chain, and the ruler and
//! forbid templates annotating every interval. Stations and intervals live
//! in arenas and refer to each other by handle, so removing one never
//! leaves a dangling reference in a surviving neighbour.
//!
//! The implementation is split by concern:
//! - `topology`: station insertion, removal, renaming, reversal, splicing
//! - `lookup`: exact and general name resolution, interval navigation
//! - `path`: multi-interval pathfinding
//! - `templates`: ruler and forbid management
//! - `layout`: y-value computation for diagram rendering

mod diagnostics;
mod display;
mod layout;
mod lookup;
mod number_map;
mod path;
mod templates;
mod topology;

use std::collections::HashMap;

use generational_arena::Arena;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Forbid, IntervalId, RailInterval, RailStation, Ruler, StationId, StationName,
};

pub use diagnostics::{Diagnostic, DiagnosticSink, TemplateKind, TracingSink};
pub use display::{IntervalTable, StationTable};
pub use templates::{ForbidView, RulerView};

use number_map::NumberMap;

/// Free-form authorship information attached to a railway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RailInfoNote {
    pub author: String,
    pub version: String,
    pub note: String,
}

/// A railway line: stations, intervals, rulers and forbids.
///
/// # Invariants
///
/// - `name_map` holds exactly the names of the stations in `order`.
/// - `field_map[s]` lists every station name whose station part is `s`,
///   in insertion order.
/// - Every interval carries one ruler node per ruler and one forbid node
///   per forbid.
/// - Ruler and forbid `index` fields equal their list positions.
#[derive(Debug, Clone, Default)]
pub struct Railway {
    name: String,
    pub notes: RailInfoNote,
    stations: Arena<RailStation>,
    order: Vec<StationId>,
    intervals: Arena<RailInterval>,
    name_map: HashMap<StationName, StationId>,
    field_map: HashMap<String, Vec<StationName>>,
    number_map: NumberMap,
    rulers: Vec<Ruler>,
    forbids: Vec<Forbid>,
    ordinate: Option<usize>,
    diagram_height: f64,
}

impl Railway {
    /// Create an empty railway.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The railway's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the railway.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of stations in the sequence.
    pub fn station_count(&self) -> usize {
        self.order.len()
    }

    /// Returns true if there are no stations.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Station handles in sequence order.
    pub fn station_ids(&self) -> &[StationId] {
        &self.order
    }

    /// Stations in sequence order.
    pub fn stations(&self) -> impl DoubleEndedIterator<Item = &RailStation> + '_ {
        self.order.iter().map(|id| &self.stations[id.0])
    }

    /// The station behind a handle, if still live.
    pub fn station(&self, id: StationId) -> Option<&RailStation> {
        self.stations.get(id.0)
    }

    /// Mutable access to a station's free attributes.
    ///
    /// The name and pass direction are not reachable this way; they feed
    /// the lookup indices and the interval chains.
    pub fn station_mut(&mut self, id: StationId) -> Option<&mut RailStation> {
        self.stations.get_mut(id.0)
    }

    /// Handle of the station at sequence position `index`.
    pub fn station_id_at(&self, index: usize) -> Option<StationId> {
        self.order.get(index).copied()
    }

    /// The station at sequence position `index`.
    pub fn station_at(&self, index: usize) -> Option<&RailStation> {
        self.station_id_at(index).map(|id| &self.stations[id.0])
    }

    /// The interval behind a handle, if still live.
    pub fn interval(&self, id: IntervalId) -> Option<&RailInterval> {
        self.intervals.get(id.0)
    }

    /// Mutable access to an interval's template nodes.
    pub fn interval_mut(&mut self, id: IntervalId) -> Option<&mut RailInterval> {
        self.intervals.get_mut(id.0)
    }

    /// Number of intervals over both chains.
    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    /// Height of the diagram computed by the last layout pass.
    pub fn diagram_height(&self) -> f64 {
        self.diagram_height
    }

    /// Internal station access; `id` must be live.
    fn st(&self, id: StationId) -> &RailStation {
        &self.stations[id.0]
    }

    /// Internal interval access; `id` must be live.
    fn it(&self, id: IntervalId) -> &RailInterval {
        &self.intervals[id.0]
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn new_railway_is_empty() {
        let rail = Railway::new("Longhai");
        assert_eq!(rail.name(), "Longhai");
        assert!(rail.is_empty());
        assert_eq!(rail.interval_count(), 0);
        assert_eq!(rail.diagram_height(), 0.0);
    }

    #[test]
    fn accessors_follow_sequence_order() {
        let rail = both_via(&[("A", 0.0), ("B", 10.0), ("C", 25.0)]);
        let names: Vec<_> = rail.stations().map(|s| s.name().to_literal()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(rail.station_at(1).unwrap().mile, 10.0);
        assert!(rail.station_at(3).is_none());
        // two down intervals plus two up intervals
        assert_eq!(rail.interval_count(), 4);
    }

    #[test]
    fn station_mut_edits_free_attributes() {
        let mut rail = both_via(&[("A", 0.0), ("B", 10.0)]);
        let id = rail.station_id_at(1).unwrap();
        rail.station_mut(id).unwrap().mile = 12.0;
        assert_eq!(rail.station(id).unwrap().mile, 12.0);
    }
}
