//! Multi-interval pathfinding between two stations.

use tracing::trace;

use super::{Diagnostic, DiagnosticSink, Railway, TracingSink};
use crate::domain::{Direction, IntervalId, StationId, StationName};

impl Railway {
    /// The intervals leading from `from` to `to`, in travel order.
    ///
    /// Both names are resolved generally. Empty if either station is
    /// missing, they are the same station, or no chain connects them.
    pub fn multi_interval_path(&self, from: &StationName, to: &StationName) -> Vec<IntervalId> {
        self.multi_interval_path_with(from, to, &mut TracingSink)
    }

    /// [`multi_interval_path`](Self::multi_interval_path), reporting a
    /// wrong mileage-based direction guess to `sink`.
    pub fn multi_interval_path_with(
        &self,
        from: &StationName,
        to: &StationName,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<IntervalId> {
        if let Some(direct) = self.find_general_interval(from, to) {
            return vec![direct];
        }
        let (Some(s1), Some(s2)) = (
            self.station_id_by_general_name(from),
            self.station_id_by_general_name(to),
        ) else {
            return Vec::new();
        };
        if s1 == s2 {
            return Vec::new();
        }

        // Sequence order is authoritative; mileage is only a guess.
        if self.number_map.is_enabled() {
            if let Some(dir) = self.gap_direction_by_index(from, to) {
                return self.walk_path(s1, s2, dir).unwrap_or_default();
            }
        }
        let dir = self.gap_direction_between(s1, s2);
        if let Some(path) = self.walk_path(s1, s2, dir) {
            return path;
        }
        sink.report(Diagnostic::PathDirectionRetry {
            from: from.clone(),
            to: to.clone(),
        });
        self.walk_path(s1, s2, dir.reverse()).unwrap_or_default()
    }

    /// Follow the `dir` chain from `from` until an interval ends at `to`.
    fn walk_path(&self, from: StationId, to: StationId, dir: Direction) -> Option<Vec<IntervalId>> {
        let mut path = Vec::new();
        let mut cur = self.st(from).dir_next(dir);
        while let Some(id) = cur {
            path.push(id);
            if self.it(id).to == to {
                trace!(intervals = path.len(), %dir, "path found");
                return Some(path);
            }
            cur = self.next_interval(id);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    use crate::domain::PassedDirection::{BothVia, DownVia, UpVia};

    fn ends(rail: &Railway, path: &[IntervalId]) -> (String, String) {
        let first = rail.interval(path[0]).unwrap();
        let last = rail.interval(*path.last().unwrap()).unwrap();
        (
            rail.station(first.from_station()).unwrap().name().to_literal(),
            rail.station(last.to_station()).unwrap().name().to_literal(),
        )
    }

    fn line() -> Railway {
        railway(&[
            ("A", 0.0, BothVia),
            ("B", 5.0, DownVia),
            ("C", 8.0, UpVia),
            ("D::North", 12.0, BothVia),
            ("E", 20.0, BothVia),
        ])
    }

    #[test]
    fn adjacent_pair_is_one_interval() {
        let rail = line();
        let path = rail.multi_interval_path(&name("A"), &name("B"));
        assert_eq!(path.len(), 1);
        assert_eq!(ends(&rail, &path), ("A".into(), "B".into()));
    }

    #[test]
    fn down_path_includes_final_interval() {
        let rail = line();
        let path = rail.multi_interval_path(&name("A"), &name("E"));
        assert_eq!(path.len(), 3);
        assert_eq!(ends(&rail, &path), ("A".into(), "E".into()));
        for pair in path.windows(2) {
            assert_eq!(rail.next_interval(pair[0]), Some(pair[1]));
        }
    }

    #[test]
    fn up_path_uses_up_only_stations() {
        let rail = line();
        let path = rail.multi_interval_path(&name("E"), &name("A"));
        assert_eq!(path.len(), 3);
        assert_eq!(ends(&rail, &path), ("E".into(), "A".into()));
    }

    #[test]
    fn general_names_resolve() {
        let rail = line();
        let path = rail.multi_interval_path(&name("A::Yard"), &name("D::North"));
        assert_eq!(path.len(), 2);
        assert_eq!(ends(&rail, &path), ("A".into(), "D::North".into()));
    }

    #[test]
    fn no_path_is_empty() {
        let rail = line();
        assert!(rail.multi_interval_path(&name("A"), &name("Q")).is_empty());
        assert!(rail.multi_interval_path(&name("A"), &name("A")).is_empty());
        // B is down-only and C up-only: no chain joins them
        let mut sink: Vec<Diagnostic> = Vec::new();
        assert!(rail
            .multi_interval_path_with(&name("B"), &name("C"), &mut sink)
            .is_empty());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn wrong_mileage_guess_retries() {
        // mileage decreases along the line
        let rail = both_via(&[("A", 30.0), ("B", 20.0), ("C", 10.0), ("D", 0.0)]);
        let mut sink: Vec<Diagnostic> = Vec::new();
        let path = rail.multi_interval_path_with(&name("A"), &name("C"), &mut sink);
        assert_eq!(path.len(), 2);
        assert_eq!(ends(&rail, &path), ("A".into(), "C".into()));
        assert_eq!(
            sink,
            vec![Diagnostic::PathDirectionRetry {
                from: name("A"),
                to: name("C"),
            }]
        );
    }

    #[test]
    fn station_index_decides_without_retry() {
        let mut rail = both_via(&[("A", 30.0), ("B", 20.0), ("C", 10.0), ("D", 0.0)]);
        rail.enable_number_map();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let path = rail.multi_interval_path_with(&name("D"), &name("B"), &mut sink);
        assert_eq!(ends(&rail, &path), ("D".into(), "B".into()));
        assert_eq!(path.len(), 2);
        assert!(sink.is_empty());
    }
}
