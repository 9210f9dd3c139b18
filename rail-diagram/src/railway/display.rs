//! Plain-text tables of a railway's stations and intervals.

use std::fmt;

use super::Railway;

/// Station table: one row per station in sequence order.
pub struct StationTable<'a>(&'a Railway);

/// Interval table: the down chain, then the up chain, with the nodes of
/// every ruler.
pub struct IntervalTable<'a>(&'a Railway);

impl Railway {
    /// A printable table of the stations.
    pub fn station_table(&self) -> StationTable<'_> {
        StationTable(self)
    }

    /// A printable table of the intervals and their ruler nodes.
    pub fn interval_table(&self) -> IntervalTable<'_> {
        IntervalTable(self)
    }
}

impl fmt::Display for StationTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rail = self.0;
        writeln!(f, "{} ({} stations)", rail.name, rail.station_count())?;
        for (i, st) in rail.stations().enumerate() {
            write!(
                f,
                "{i:>3}  {:<16} {:>9.3} {:>9} {:>3}  {:<7}",
                st.name.to_string(),
                st.mile,
                st.counter_str(),
                st.level,
                st.direction,
            )?;
            if let Some(y) = st.y_value {
                write!(f, " y={y:.1}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for IntervalTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rail = self.0;
        for id in rail.intervals_circ() {
            let it = rail.it(id);
            write!(
                f,
                "{:<4} {} -> {} {:.3} km",
                it.direction,
                rail.st(it.from).name,
                rail.st(it.to).name,
                rail.interval_mile(id),
            )?;
            for (ruler, node) in rail.rulers.iter().zip(&it.ruler_nodes) {
                if node.is_null() {
                    write!(f, "  [{}: -]", ruler.name)?;
                } else {
                    write!(f, "  [{}: {}s]", ruler.name, node.interval)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
