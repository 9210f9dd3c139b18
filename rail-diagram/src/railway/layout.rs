//! Vertical layout of stations for diagram rendering.
//!
//! Without an ordinate ruler a station's y is proportional to its
//! mileage. With one, y is proportional to accumulated ruler time along
//! the down chain; stations the down chain skips are placed between their
//! nearest both-direction neighbours in proportion to up-direction ruler
//! time. Any gap in the ruler data abandons the ruler layout: the ordinate
//! is reset and the mileage layout is used instead.

use tracing::debug;

use super::{Diagnostic, DiagnosticSink, Railway, TracingSink};
use crate::config::DiagramConfig;
use crate::domain::{Direction, IntervalId, StationId};

impl Railway {
    /// Assign every station its y value and return the diagram height.
    pub fn cal_station_y_value(&mut self, config: &DiagramConfig) -> f64 {
        self.cal_station_y_value_with(config, &mut TracingSink)
    }

    /// [`cal_station_y_value`](Self::cal_station_y_value), reporting a
    /// fallback to mileage layout to `sink`.
    pub fn cal_station_y_value_with(
        &mut self,
        config: &DiagramConfig,
        sink: &mut dyn DiagnosticSink,
    ) -> f64 {
        let Some(ruler) = self.ordinate else {
            return self.cal_station_y_value_by_mile(config);
        };
        if self.first_down_interval().is_none() {
            return self.cal_station_y_value_by_mile(config);
        }

        match self.layout_by_ruler(ruler, config) {
            Ok(()) => {
                self.diagram_height = self.max_y_value();
                debug!(ruler, height = self.diagram_height, "laid out by ruler");
            }
            Err(diagnostic) => {
                sink.report(diagnostic);
                self.ordinate = None;
                self.cal_station_y_value_by_mile(config);
            }
        }
        self.diagram_height
    }

    /// Mileage layout: `y = mile * pixels_per_km`.
    pub fn cal_station_y_value_by_mile(&mut self, config: &DiagramConfig) -> f64 {
        for id in &self.order {
            let st = &mut self.stations[id.0];
            st.y_value = Some(st.mile * config.pixels_per_km);
        }
        self.diagram_height = self.max_y_value();
        self.diagram_height
    }

    fn max_y_value(&self) -> f64 {
        self.stations()
            .filter_map(|st| st.y_value)
            .fold(0.0, f64::max)
    }

    fn layout_by_ruler(&mut self, ruler: usize, config: &DiagramConfig) -> Result<(), Diagnostic> {
        self.clear_y_values();

        let down: Vec<IntervalId> = self.interval_chain(Direction::Down).collect();
        if let Some(first) = down.first() {
            let origin = self.it(*first).from;
            self.stations[origin.0].y_value = Some(0.0);
        }
        let mut y = 0.0;
        for id in down {
            let node = self.it(id).ruler_nodes[ruler];
            if node.is_null() {
                return Err(self.incomplete(ruler, id));
            }
            y += f64::from(node.interval) / config.seconds_per_pix_y;
            let to = self.it(id).to;
            self.stations[to.0].y_value = Some(y);
        }

        let up: Vec<IntervalId> = self.interval_chain(Direction::Up).collect();
        if let Some(first) = up.first() {
            // nothing lies right of the up chain's origin to anchor it
            let origin = self.it(*first).from;
            if self.st(origin).y_value.is_none() {
                return Err(Diagnostic::MissingBothAnchor(self.st(origin).name.clone()));
            }
        }
        for id in up {
            let target = self.it(id).to;
            if self.st(target).y_value.is_some() {
                continue;
            }
            if self.it(id).ruler_nodes[ruler].is_null() {
                return Err(self.incomplete(ruler, id));
            }
            let y = self.interpolate_up_only(ruler, target)?;
            self.stations[target.0].y_value = Some(y);
        }
        Ok(())
    }

    /// Place a station that only the up chain visits between its nearest
    /// both-direction neighbours.
    fn interpolate_up_only(&self, ruler: usize, target: StationId) -> Result<f64, Diagnostic> {
        let missing = || Diagnostic::MissingBothAnchor(self.st(target).name.clone());
        let right = self.right_both_station(target).ok_or_else(missing)?;
        let left = self.left_both_station(target).ok_or_else(missing)?;
        let (Some(ry), Some(ly)) = (self.st(right).y_value, self.st(left).y_value) else {
            return Err(missing());
        };

        let view = self.ruler(ruler).ok_or_else(missing)?;
        let up_left = view
            .total_interval(target, left, Direction::Up)
            .ok_or_else(|| self.incomplete_span(ruler, target, left))?;
        let up_right = view
            .total_interval(right, target, Direction::Up)
            .ok_or_else(|| self.incomplete_span(ruler, right, target))?;

        let total = up_left + up_right;
        if total == 0 {
            return Ok(ry);
        }
        Ok(ry - (ry - ly) * f64::from(up_right) / f64::from(total))
    }

    fn incomplete(&self, ruler: usize, id: IntervalId) -> Diagnostic {
        let it = self.it(id);
        self.incomplete_span(ruler, it.from, it.to)
    }

    fn incomplete_span(&self, ruler: usize, from: StationId, to: StationId) -> Diagnostic {
        Diagnostic::IncompleteOrdinate {
            ruler: self.rulers[ruler].name.clone(),
            from: self.st(from).name.clone(),
            to: self.st(to).name.clone(),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::RulerNode;
    use proptest::prelude::*;

    fn line(gaps: &[f64]) -> Railway {
        let mut mile = 0.0;
        let mut spec = Vec::new();
        for (i, gap) in gaps.iter().enumerate() {
            spec.push((format!("S{i}"), mile));
            mile += gap;
        }
        let refs: Vec<(&str, f64)> = spec.iter().map(|(s, m)| (s.as_str(), *m)).collect();
        both_via(&refs)
    }

    proptest! {
        /// Mileage layout preserves mileage order.
        #[test]
        fn mileage_layout_is_monotonic(
            gaps in proptest::collection::vec(0.0f64..50.0, 1..15),
            px in 0.1f64..10.0,
        ) {
            let mut rail = line(&gaps);
            rail.cal_station_y_value(&DiagramConfig::new(8.0, px));
            let ys: Vec<f64> = rail.stations().map(|s| s.y_value.unwrap()).collect();
            for pair in ys.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }

        /// Ruler layout is monotonic along the down chain and ends at the
        /// total ruler time.
        #[test]
        fn ruler_layout_is_monotonic(
            secs in proptest::collection::vec(1u32..3600, 1..12),
        ) {
            let gaps = vec![1.0; secs.len() + 1];
            let mut rail = line(&gaps);
            let r = rail.add_empty_ruler("std", false).unwrap();
            let ids: Vec<IntervalId> = rail.interval_chain(Direction::Down).collect();
            for (id, s) in ids.iter().zip(&secs) {
                rail.interval_mut(*id).unwrap().ruler_nodes[r] = RulerNode::new(*s, 0, 0);
            }
            rail.set_ordinate(Some(r)).unwrap();

            let mut sink: Vec<Diagnostic> = Vec::new();
            let height = rail.cal_station_y_value_with(&DiagramConfig::new(8.0, 1.0), &mut sink);
            prop_assert!(sink.is_empty());
            let ys: Vec<f64> = rail.stations().map(|s| s.y_value.unwrap()).collect();
            for pair in ys.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
            let total: u32 = secs.iter().sum();
            prop_assert!((height - f64::from(total) / 8.0).abs() < 1e-6);
        }
    }
}
