//! Name resolution and interval navigation.
//!
//! Two lookup modes exist. Exact lookups (`station_by_name`,
//! `find_interval`) match a [`StationName`] identically and are what
//! template loading uses. General lookups (`station_by_general_name`,
//! `find_general_interval`) also accept a name whose stored counterpart is
//! its bare form, and are what pathfinding uses.

use std::iter;

use super::Railway;
use crate::domain::{Direction, IntervalId, PassedDirection, RailStation, StationId, StationName};

impl Railway {
    /// Handle of the station with exactly this name.
    pub fn station_id_by_name(&self, name: &StationName) -> Option<StationId> {
        self.name_map.get(name).copied()
    }

    /// Exact-name lookup.
    pub fn station_by_name(&self, name: &StationName) -> Option<&RailStation> {
        self.station_id_by_name(name).map(|id| self.st(id))
    }

    /// General-name lookup.
    ///
    /// Tries the exact name first. Otherwise returns the first station, in
    /// insertion order, whose name [equals or contains](StationName::equal_or_contains)
    /// `name`.
    pub fn station_id_by_general_name(&self, name: &StationName) -> Option<StationId> {
        if let Some(id) = self.station_id_by_name(name) {
            return Some(id);
        }
        self.field_map
            .get(name.station())?
            .iter()
            .find(|candidate| candidate.equal_or_contains(name))
            .and_then(|candidate| self.station_id_by_name(candidate))
    }

    /// General-name lookup returning the station itself.
    pub fn station_by_general_name(&self, name: &StationName) -> Option<&RailStation> {
        self.station_id_by_general_name(name).map(|id| self.st(id))
    }

    /// True if a station has exactly this name.
    pub fn contains_station(&self, name: &StationName) -> bool {
        self.name_map.contains_key(name)
    }

    /// True if `name` is here exactly, or its station is here in bare form.
    pub fn contains_general_station(&self, name: &StationName) -> bool {
        self.field_map
            .get(name.station())
            .is_some_and(|list| list.iter().any(|n| n.is_bare() || n == name))
    }

    /// The name this railway uses for `name`, resolved generally; `name`
    /// itself when nothing matches.
    pub fn local_name(&self, name: &StationName) -> StationName {
        self.station_by_general_name(name)
            .map_or_else(|| name.clone(), |st| st.name.clone())
    }

    /// Sequence position of a station.
    ///
    /// Uses the station index when enabled, resolving `name` generally
    /// first; otherwise scans the sequence for the exact name.
    pub fn station_index(&self, name: &StationName) -> Option<usize> {
        if self.number_map.is_enabled() {
            return self.number_map.get(&self.local_name(name));
        }
        self.order.iter().position(|id| &self.st(*id).name == name)
    }

    /// Direction of travel from `from` to `to`, judged by mileage.
    pub fn gap_direction(&self, from: &StationName, to: &StationName) -> Option<Direction> {
        let s1 = self.station_id_by_general_name(from)?;
        let s2 = self.station_id_by_general_name(to)?;
        Some(self.gap_direction_between(s1, s2))
    }

    pub(super) fn gap_direction_between(&self, from: StationId, to: StationId) -> Direction {
        if self.st(from).mile <= self.st(to).mile {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// Direction of travel from `from` to `to`, judged by sequence position.
    pub fn gap_direction_by_index(
        &self,
        from: &StationName,
        to: &StationName,
    ) -> Option<Direction> {
        let i1 = self.station_index(from)?;
        let i2 = self.station_index(to)?;
        Some(if i1 <= i2 {
            Direction::Down
        } else {
            Direction::Up
        })
    }

    /// Number of stations strictly between `from` and `to` along the chain
    /// connecting them.
    ///
    /// The direction is guessed from mileage and retried reversed when the
    /// guess does not reach `to`.
    pub fn stations_between(&self, from: StationId, to: StationId) -> Option<usize> {
        let dir = self.gap_direction_between(from, to);
        self.count_between(from, to, dir)
            .or_else(|| self.count_between(from, to, dir.reverse()))
    }

    fn count_between(&self, from: StationId, to: StationId, dir: Direction) -> Option<usize> {
        let mut count = 0;
        let mut cur = self.dir_adjacent(from, dir)?;
        while cur != to {
            count += 1;
            cur = self.dir_adjacent(cur, dir)?;
        }
        Some(count)
    }

    /// The next station after `id` in direction `dir`.
    pub fn dir_adjacent(&self, id: StationId, dir: Direction) -> Option<StationId> {
        let next = self.st(id).dir_next(dir)?;
        Some(self.it(next).to)
    }

    /// Mileage distance between two stations, resolved generally.
    ///
    /// Travelling up between two stations that both carry counters uses the
    /// counter difference instead.
    pub fn mile_between(&self, from: &StationName, to: &StationName) -> Option<f64> {
        let s1 = self.station_id_by_general_name(from)?;
        let s2 = self.station_id_by_general_name(to)?;
        Some(self.mile_between_ids(s1, s2))
    }

    fn mile_between_ids(&self, from: StationId, to: StationId) -> f64 {
        let (a, b) = (self.st(from), self.st(to));
        // one missing counter puts the pair in different frames
        let dir = if a.counter.is_some() && b.counter.is_some() {
            self.gap_direction_between(from, to)
        } else {
            Direction::Down
        };
        (a.dir_mile(dir) - b.dir_mile(dir)).abs()
    }

    /// Length of an interval, derived from its endpoints.
    pub fn interval_mile(&self, id: IntervalId) -> f64 {
        let it = self.it(id);
        self.mile_between_ids(it.from, it.to)
    }

    /// True if any station is passed in one direction only.
    pub fn is_splitted(&self) -> bool {
        self.stations().any(|st| {
            matches!(
                st.direction,
                PassedDirection::DownVia | PassedDirection::UpVia
            )
        })
    }

    /// The interval leaving `from` whose far end is exactly `to`.
    pub fn find_interval(&self, from: &StationName, to: &StationName) -> Option<IntervalId> {
        let st = self.station_by_name(from)?;
        [Direction::Down, Direction::Up]
            .into_iter()
            .filter_map(|dir| st.dir_next(dir))
            .find(|id| &self.st(self.it(*id).to).name == to)
    }

    /// Like [`find_interval`](Self::find_interval), but `from` is resolved
    /// generally and `to` may be matched by a containing name.
    pub fn find_general_interval(
        &self,
        from: &StationName,
        to: &StationName,
    ) -> Option<IntervalId> {
        let st = self.station_by_general_name(from)?;
        let leaving: Vec<IntervalId> = [Direction::Down, Direction::Up]
            .into_iter()
            .filter_map(|dir| st.dir_next(dir))
            .collect();
        let far = |id: IntervalId| &self.st(self.it(id).to).name;
        leaving
            .iter()
            .find(|id| far(**id) == to)
            .or_else(|| leaving.iter().find(|id| far(**id).equal_or_contains(to)))
            .copied()
    }

    /// The down interval leaving the first down-passed station.
    pub fn first_down_interval(&self) -> Option<IntervalId> {
        self.stations()
            .find(|st| st.is_down_via())
            .and_then(|st| st.down_next)
    }

    /// The up interval leaving the last up-passed station.
    pub fn first_up_interval(&self) -> Option<IntervalId> {
        self.stations()
            .rev()
            .find(|st| st.is_up_via())
            .and_then(|st| st.up_next)
    }

    /// The following interval in the same chain.
    pub fn next_interval(&self, id: IntervalId) -> Option<IntervalId> {
        let it = self.it(id);
        self.st(it.to).dir_next(it.direction)
    }

    /// The preceding interval in the same chain.
    pub fn prev_interval(&self, id: IntervalId) -> Option<IntervalId> {
        let it = self.it(id);
        self.st(it.from).dir_prev(it.direction)
    }

    /// Next interval, continuing from the end of the down chain onto the
    /// start of the up chain.
    pub fn next_interval_circ(&self, id: IntervalId) -> Option<IntervalId> {
        match self.next_interval(id) {
            None if self.it(id).is_down() => self.first_up_interval(),
            next => next,
        }
    }

    /// The intervals of one chain, first to last.
    pub fn interval_chain(&self, dir: Direction) -> impl Iterator<Item = IntervalId> + '_ {
        let first = match dir {
            Direction::Down => self.first_down_interval(),
            Direction::Up => self.first_up_interval(),
        };
        iter::successors(first, |id| self.next_interval(*id))
    }

    /// Every interval: the down chain, then the up chain.
    pub fn intervals_circ(&self) -> impl Iterator<Item = IntervalId> + '_ {
        self.interval_chain(Direction::Down)
            .chain(self.interval_chain(Direction::Up))
    }

    /// Nearest both-direction station reached by walking up from `id`.
    pub fn left_both_station(&self, id: StationId) -> Option<StationId> {
        iter::successors(self.st(id).up_next, |i| self.next_interval(*i))
            .map(|i| self.it(i).to)
            .find(|s| self.st(*s).direction == PassedDirection::BothVia)
    }

    /// Nearest both-direction station reached by walking the up chain
    /// backwards from `id`.
    pub fn right_both_station(&self, id: StationId) -> Option<StationId> {
        iter::successors(self.st(id).up_prev, |i| self.prev_interval(*i))
            .map(|i| self.it(i).from)
            .find(|s| self.st(*s).direction == PassedDirection::BothVia)
    }

    /// Adjacent station pairs of one chain, by sequence rather than links.
    ///
    /// The first station of the walk is included whatever its direction.
    pub fn adj_intervals(&self, down: bool) -> Vec<(StationName, StationName)> {
        let walk: Vec<&RailStation> = if down {
            self.stations().collect()
        } else {
            self.stations().rev().collect()
        };
        let Some((first, rest)) = walk.split_first() else {
            return Vec::new();
        };
        let dir = if down { Direction::Down } else { Direction::Up };
        let mut last = &first.name;
        let mut pairs = Vec::with_capacity(rest.len());
        for st in rest.iter().filter(|st| st.is_via(dir)) {
            pairs.push((last.clone(), st.name.clone()));
            last = &st.name;
        }
        pairs
    }

    /// Clear every station's layout coordinate.
    pub fn clear_y_values(&mut self) {
        for (_, st) in self.stations.iter_mut() {
            st.y_value = None;
        }
    }
}
