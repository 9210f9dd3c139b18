//! Station insertion, removal and whole-line transformations.
//!
//! Every mutation here keeps three structures in step: the station
//! sequence, the name indices, and the down/up interval chains.

use tracing::debug;

use super::Railway;
use crate::domain::{
    Direction, IntervalId, PassedDirection, RailError, RailInterval, RailStation, StationId,
    StationName,
};

const DIRECTIONS: [Direction; 2] = [Direction::Down, Direction::Up];

impl Railway {
    /// Append a station at the end of the sequence.
    ///
    /// The station is linked to its nearest left neighbour in every
    /// direction it passes.
    pub fn append_station(&mut self, station: RailStation) -> Result<StationId, RailError> {
        self.insert_station(self.order.len(), station)
    }

    /// Insert a station at sequence position `index`.
    ///
    /// In each direction the station passes, an interval spanning its two
    /// neighbours is replaced by two fresh intervals whose ruler and forbid
    /// nodes are null.
    ///
    /// # Errors
    ///
    /// - [`RailError::IndexOutOfRange`] if `index > station_count()`
    /// - [`RailError::DuplicateStation`] if the exact name is taken
    pub fn insert_station(
        &mut self,
        index: usize,
        mut station: RailStation,
    ) -> Result<StationId, RailError> {
        if index > self.order.len() {
            return Err(RailError::IndexOutOfRange {
                index,
                count: self.order.len(),
            });
        }
        if self.name_map.contains_key(&station.name) {
            return Err(RailError::DuplicateStation(station.name));
        }

        for dir in DIRECTIONS {
            station.set_dir_prev(dir, None);
            station.set_dir_next(dir, None);
        }
        station.y_value = None;

        let id = StationId(self.stations.insert(station));
        self.order.insert(index, id);
        self.add_map_info(id);
        self.link_station(index, id);
        self.refresh_number_map();
        Ok(id)
    }

    /// Remove the station at sequence position `index`.
    ///
    /// Where the station had intervals on both sides in one direction, they
    /// are merged into one; where it ended a chain, the end interval goes.
    pub fn remove_station_at(&mut self, index: usize) -> Option<RailStation> {
        let id = *self.order.get(index)?;
        self.unlink_station(id);
        self.order.remove(index);
        let station = self.stations.remove(id.0)?;
        self.remove_map_info(&station.name);
        self.refresh_number_map();
        Some(station)
    }

    /// Remove the station with exactly this name.
    pub fn remove_station(&mut self, name: &StationName) -> Option<RailStation> {
        let id = *self.name_map.get(name)?;
        let index = self.position_of(id)?;
        self.remove_station_at(index)
    }

    /// Rename a station in place.
    ///
    /// # Errors
    ///
    /// - [`RailError::StationNotFound`] if `old` is not an exact name here
    /// - [`RailError::DuplicateStation`] if `new` belongs to another station
    pub fn change_station_name(
        &mut self,
        old: &StationName,
        new: StationName,
    ) -> Result<(), RailError> {
        let id = *self
            .name_map
            .get(old)
            .ok_or_else(|| RailError::StationNotFound(old.clone()))?;
        if old == &new {
            return Ok(());
        }
        if self.name_map.contains_key(&new) {
            return Err(RailError::DuplicateStation(new));
        }

        self.stations[id.0].name = new;
        self.remove_map_info(old);
        self.add_map_info(id);
        self.refresh_number_map();
        Ok(())
    }

    /// Change which directions pass a station.
    ///
    /// The station leaves the chains it no longer belongs to (merging its
    /// intervals as on removal) and joins the new ones (splitting as on
    /// insertion).
    pub fn change_station_direction(
        &mut self,
        name: &StationName,
        direction: PassedDirection,
    ) -> Result<(), RailError> {
        let id = *self
            .name_map
            .get(name)
            .ok_or_else(|| RailError::StationNotFound(name.clone()))?;
        self.set_direction(id, direction);
        Ok(())
    }

    fn set_direction(&mut self, id: StationId, direction: PassedDirection) {
        let old = self.st(id).direction;
        for dir in DIRECTIONS {
            if old.is_via(dir) && !direction.is_via(dir) {
                self.unlink_station_dir(id, dir);
            }
        }
        self.stations[id.0].direction = direction;
        let Some(pos) = self.position_of(id) else {
            return;
        };
        for dir in DIRECTIONS {
            if !old.is_via(dir) && direction.is_via(dir) {
                self.link_station_dir(pos, id, dir);
            }
        }
    }

    /// Mileage of the last station.
    pub fn rail_length(&self) -> f64 {
        self.order.last().map_or(0.0, |id| self.st(*id).mile)
    }

    /// Counter of the last station, or its mileage when it has none.
    pub fn counter_length(&self) -> f64 {
        self.order.last().map_or(0.0, |id| {
            let last = self.st(*id);
            last.counter.unwrap_or(last.mile)
        })
    }

    /// Shift mileages (and counters) so the first station sits at zero.
    pub fn adjust_mile_to_zero(&mut self) {
        let Some(first) = self.order.first() else {
            return;
        };
        let first = self.st(*first);
        let (m0, c0) = (first.mile, first.counter);
        for id in &self.order {
            let st = &mut self.stations[id.0];
            st.mile -= m0;
            if let (Some(c), Some(c0)) = (st.counter.as_mut(), c0) {
                *c -= c0;
            }
        }
    }

    /// Turn the line around: the last station becomes the first.
    ///
    /// Mileages are reflected (the up-direction counter becomes the new
    /// mileage), down/up links and tags swap, and every interval flips
    /// direction. Each frame is reflected about the midpoint of its first
    /// and last readings, so reversing twice restores every mileage.
    pub fn reverse(&mut self) {
        let Some(first) = self.order.first() else {
            return;
        };
        let first = self.st(*first);
        let mile_axis = first.mile + self.rail_length();
        let counter_axis = first.counter.unwrap_or(first.mile) + self.counter_length();

        for id in &self.order {
            let st = &mut self.stations[id.0];
            let mile = mile_axis - st.mile;
            let counter = st.counter.map_or(mile, |c| counter_axis - c);
            st.mile = counter;
            st.counter = Some(mile);
            st.direction = st.direction.reversed();
            std::mem::swap(&mut st.down_next, &mut st.up_next);
            std::mem::swap(&mut st.down_prev, &mut st.up_prev);
        }
        for (_, interval) in self.intervals.iter_mut() {
            interval.direction = interval.direction.reverse();
        }
        self.order.reverse();
        self.refresh_number_map();
    }

    /// Fold the up-direction mileage of `other`, the same line described
    /// in the opposite order, into this railway's counters.
    ///
    /// Stations present in both become both-direction stations; stations
    /// only in `other` are inserted as up-only stations.
    pub fn merge_counter(&mut self, other: &Railway) -> Result<(), RailError> {
        let other_length = other.rail_length();
        let mut i = 0;
        let mut j = other.order.len();
        while i < self.order.len() && j > 0 {
            let theirs = other.st(other.order[j - 1]);
            let mine = self.order[i];
            if self.st(mine).name == theirs.name {
                self.set_direction(mine, PassedDirection::BothVia);
                self.stations[mine.0].counter = Some(other_length - theirs.mile);
                i += 1;
                j -= 1;
            } else if !self.contains_station(&theirs.name) {
                let mile = other_length - theirs.mile;
                let station = RailStation::new(
                    theirs.name.clone(),
                    mile,
                    theirs.level,
                    Some(mile),
                    PassedDirection::UpVia,
                );
                self.insert_station(i, station)?;
                i += 1;
                j -= 1;
            } else {
                // down-only station of ours
                i += 1;
            }
        }

        // Align the counter origin with the first up-passed station.
        let leading_down_only = self
            .order
            .iter()
            .take_while(|id| !self.st(**id).is_up_via())
            .count();
        if leading_down_only > 0 && leading_down_only < self.order.len() {
            let m0 = self.st(self.order[leading_down_only]).mile;
            for id in &self.order[leading_down_only..] {
                if let Some(c) = self.stations[id.0].counter.as_mut() {
                    *c += m0;
                }
            }
        }
        Ok(())
    }

    /// A new railway made of the stations at positions `start..end`.
    ///
    /// Rulers and forbids are carried over for every interval that still
    /// joins the same two stations.
    pub fn slice(&self, start: usize, end: usize) -> Railway {
        let end = end.min(self.order.len());
        let mut rail = Railway::new(self.name.clone());
        rail.notes = self.notes.clone();
        for id in self.order.get(start..end).unwrap_or_default() {
            // names are unique here, so the append cannot fail
            let _ = rail.append_station(self.st(*id).detached());
        }

        for ruler in &self.rulers {
            let _ = rail.add_empty_ruler(&ruler.name, ruler.different);
        }
        for forbid in &self.forbids {
            let index = rail.add_empty_forbid(forbid.different);
            rail.forbids[index].down_show = forbid.down_show;
            rail.forbids[index].up_show = forbid.up_show;
        }
        let ids: Vec<IntervalId> = rail.intervals.iter().map(|(i, _)| IntervalId(i)).collect();
        for id in ids {
            let from = rail.st(rail.it(id).from).name.clone();
            let to = rail.st(rail.it(id).to).name.clone();
            let Some(source) = self.find_interval(&from, &to) else {
                continue;
            };
            let source = self.it(source);
            let target = &mut rail.intervals[id.0];
            target.ruler_nodes.clone_from(&source.ruler_nodes);
            target.forbid_nodes.clone_from(&source.forbid_nodes);
        }
        rail.ordinate = self.ordinate;
        rail
    }

    /// Splice `other` onto this railway.
    ///
    /// With `former`, `other` goes in front and this railway's mileage is
    /// shifted by its length; otherwise `other` is appended with its
    /// mileage shifted by ours. With `reverse`, this railway is reversed
    /// first. Stations already present are not added twice. Templates of
    /// `other` are not carried over.
    pub fn joint_with(
        &mut self,
        other: &Railway,
        former: bool,
        reverse: bool,
    ) -> Result<(), RailError> {
        if reverse {
            self.reverse();
        }
        if former {
            let length = other.rail_length();
            for id in &self.order {
                self.stations[id.0].mile += length;
            }
            for st in other.stations().rev() {
                if !self.contains_station(&st.name) {
                    self.insert_station(0, st.detached())?;
                }
            }
        } else {
            let length = self.rail_length();
            let counter_length = self.counter_length();
            for st in other.stations() {
                if self.contains_station(&st.name) {
                    continue;
                }
                let mut copy = st.detached();
                copy.mile += length;
                if let Some(c) = copy.counter.as_mut() {
                    *c += counter_length;
                }
                self.append_station(copy)?;
            }
        }
        Ok(())
    }

    pub(super) fn position_of(&self, id: StationId) -> Option<usize> {
        self.order.iter().position(|s| *s == id)
    }

    /// Register a station in the name indices.
    fn add_map_info(&mut self, id: StationId) {
        let name = self.st(id).name.clone();
        self.field_map
            .entry(name.station().to_string())
            .or_default()
            .push(name.clone());
        self.name_map.insert(name, id);
    }

    /// Drop a name from the name indices.
    fn remove_map_info(&mut self, name: &StationName) {
        self.name_map.remove(name);
        if let Some(list) = self.field_map.get_mut(name.station()) {
            list.retain(|n| n != name);
            if list.is_empty() {
                self.field_map.remove(name.station());
            }
        }
    }

    /// Rebuild both name indices from the station sequence.
    pub fn set_map_info(&mut self) {
        self.name_map.clear();
        self.field_map.clear();
        for id in self.order.clone() {
            self.add_map_info(id);
        }
    }

    /// Turn on the position index used by [`Railway::station_index`] and
    /// by pathfinding's direction decision.
    pub fn enable_number_map(&mut self) {
        self.number_map
            .enable(self.order.iter().map(|id| &self.stations[id.0].name));
    }

    /// Turn the position index off.
    pub fn disable_number_map(&mut self) {
        self.number_map.disable();
    }

    /// Whether the position index is on.
    pub fn number_map_enabled(&self) -> bool {
        self.number_map.is_enabled()
    }

    fn refresh_number_map(&mut self) {
        self.number_map
            .invalidate(self.order.iter().map(|id| &self.stations[id.0].name));
    }

    /// Nearest station left of `pos` passed in `dir`.
    pub(super) fn left_dir_station(&self, pos: usize, dir: Direction) -> Option<StationId> {
        self.order[..pos.min(self.order.len())]
            .iter()
            .rev()
            .copied()
            .find(|id| self.st(*id).is_via(dir))
    }

    /// Nearest station right of `pos` passed in `dir`.
    pub(super) fn right_dir_station(&self, pos: usize, dir: Direction) -> Option<StationId> {
        self.order
            .iter()
            .skip(pos + 1)
            .copied()
            .find(|id| self.st(*id).is_via(dir))
    }

    /// Create an interval and hook it into its endpoints.
    fn add_interval(&mut self, dir: Direction, from: StationId, to: StationId) -> IntervalId {
        let interval = RailInterval::new(dir, from, to, self.rulers.len(), self.forbids.len());
        let id = IntervalId(self.intervals.insert(interval));
        self.stations[from.0].set_dir_next(dir, Some(id));
        self.stations[to.0].set_dir_prev(dir, Some(id));
        id
    }

    /// Destroy an interval and clear the links pointing at it.
    fn drop_interval(&mut self, id: IntervalId) {
        let Some(interval) = self.intervals.remove(id.0) else {
            return;
        };
        let dir = interval.direction;
        if let Some(from) = self.stations.get_mut(interval.from.0) {
            if from.dir_next(dir) == Some(id) {
                from.set_dir_next(dir, None);
            }
        }
        if let Some(to) = self.stations.get_mut(interval.to.0) {
            if to.dir_prev(dir) == Some(id) {
                to.set_dir_prev(dir, None);
            }
        }
    }

    /// Link the station just placed at `pos` into each chain it belongs to.
    fn link_station(&mut self, pos: usize, id: StationId) {
        for dir in DIRECTIONS {
            if self.st(id).is_via(dir) {
                self.link_station_dir(pos, id, dir);
            }
        }
    }

    /// Link the station at `pos` into the `dir` chain, splitting the
    /// interval that spanned its neighbours.
    fn link_station_dir(&mut self, pos: usize, id: StationId, dir: Direction) {
        let left = self.left_dir_station(pos, dir);
        let right = self.right_dir_station(pos, dir);

        // Down runs left to right, up runs right to left.
        let (upstream, downstream) = match dir {
            Direction::Down => (left, right),
            Direction::Up => (right, left),
        };
        if let Some(old) = upstream.and_then(|u| self.st(u).dir_next(dir)) {
            debug!(interval = ?old, %dir, "splitting interval for inserted station");
            self.drop_interval(old);
        }
        if let Some(u) = upstream {
            self.add_interval(dir, u, id);
        }
        if let Some(d) = downstream {
            self.add_interval(dir, id, d);
        }
    }

    /// Detach a station from both chains, merging or trimming intervals.
    fn unlink_station(&mut self, id: StationId) {
        for dir in DIRECTIONS {
            self.unlink_station_dir(id, dir);
        }
    }

    fn unlink_station_dir(&mut self, id: StationId, dir: Direction) {
        let st = self.st(id);
        match (st.dir_prev(dir), st.dir_next(dir)) {
            (Some(prev), Some(next)) => {
                if let Some(next_interval) = self.intervals.remove(next.0) {
                    let target = next_interval.to;
                    self.intervals[prev.0].merge_with(&next_interval);
                    self.stations[target.0].set_dir_prev(dir, Some(prev));
                }
            }
            (Some(prev), None) => self.drop_interval(prev),
            (None, Some(next)) => self.drop_interval(next),
            (None, None) => {}
        }
        let st = &mut self.stations[id.0];
        st.set_dir_prev(dir, None);
        st.set_dir_next(dir, None);
    }
}


#[cfg(test)]
mod proptests {
    use super::super::test_support::*;
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Insert(usize, u8),
        Remove(usize),
        AddRuler,
        RemoveRuler(usize),
        AddForbid,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..12, 0u8..4).prop_map(|(i, d)| Op::Insert(i, d)),
            (0usize..12).prop_map(Op::Remove),
            Just(Op::AddRuler),
            (0usize..4).prop_map(Op::RemoveRuler),
            Just(Op::AddForbid),
        ]
    }

    fn apply(rail: &mut Railway, op: &Op, serial: usize) {
        match op {
            Op::Insert(i, d) => {
                let index = (*i).min(rail.station_count());
                let dir = PassedDirection::try_from(*d).unwrap();
                let st = station(&format!("S{serial}"), serial as f64, dir);
                rail.insert_station(index, st).unwrap();
            }
            Op::Remove(i) => {
                rail.remove_station_at(*i);
            }
            Op::AddRuler => {
                rail.add_empty_ruler(&format!("R{serial}"), true).unwrap();
            }
            Op::RemoveRuler(i) => {
                let _ = rail.remove_ruler(*i);
            }
            Op::AddForbid => {
                rail.add_empty_forbid(true);
            }
        }
    }

    /// Both chains visit exactly the via stations in sequence order.
    fn assert_chains(rail: &Railway) {
        for dir in DIRECTIONS {
            let mut expected: Vec<StationId> = rail
                .order
                .iter()
                .copied()
                .filter(|id| rail.st(*id).is_via(dir))
                .collect();
            if dir == Direction::Up {
                expected.reverse();
            }
            let mut visited = Vec::new();
            for id in rail.interval_chain(dir) {
                let it = rail.it(id);
                assert_eq!(it.direction, dir);
                if visited.is_empty() {
                    visited.push(it.from);
                }
                visited.push(it.to);
            }
            if expected.len() < 2 {
                assert!(visited.is_empty());
            } else {
                assert_eq!(visited, expected);
            }
        }
        let on_chains = DIRECTIONS
            .iter()
            .map(|d| rail.interval_chain(*d).count())
            .sum::<usize>();
        assert_eq!(on_chains, rail.interval_count());
    }

    proptest! {
        /// Node arrays, name indices and chains stay consistent under any
        /// sequence of mutations.
        #[test]
        fn mutations_keep_invariants(ops in proptest::collection::vec(op(), 0..40)) {
            let mut rail = Railway::new("Random");
            for (serial, op) in ops.iter().enumerate() {
                apply(&mut rail, op, serial);
            }
            for (_, it) in rail.intervals.iter() {
                prop_assert_eq!(it.ruler_nodes.len(), rail.rulers.len());
                prop_assert_eq!(it.forbid_nodes.len(), rail.forbids.len());
            }
            for (i, ruler) in rail.rulers.iter().enumerate() {
                prop_assert_eq!(ruler.index, i);
            }
            let mut names: Vec<_> = rail.stations().map(|s| s.name.clone()).collect();
            names.sort();
            let mut keys: Vec<_> = rail.name_map.keys().cloned().collect();
            keys.sort();
            prop_assert_eq!(names, keys);
            assert_chains(&rail);
        }

        /// Reversing twice restores mileages and pass directions.
        #[test]
        fn reverse_twice_is_identity(
            gaps in proptest::collection::vec(0.5f64..30.0, 1..10),
            dirs in proptest::collection::vec(1u8..4, 10),
            origin in 0.0f64..500.0,
        ) {
            let mut rail = Railway::new("Twice");
            let mut mile = origin;
            for (i, gap) in gaps.iter().enumerate() {
                let dir = if i == 0 || i == gaps.len() - 1 {
                    PassedDirection::BothVia
                } else {
                    PassedDirection::try_from(dirs[i]).unwrap()
                };
                rail.append_station(station(&format!("S{i}"), mile, dir)).unwrap();
                mile += gap;
            }
            let before: Vec<_> = rail.stations().map(|s| (s.mile, s.direction())).collect();
            rail.reverse();
            rail.reverse();
            let after: Vec<_> = rail.stations().map(|s| (s.mile, s.direction())).collect();
            prop_assert_eq!(before.len(), after.len());
            for ((m1, d1), (m2, d2)) in before.iter().zip(&after) {
                prop_assert!((m1 - m2).abs() < 1e-9);
                prop_assert_eq!(d1, d2);
            }
            assert_chains(&rail);
        }
    }
}
