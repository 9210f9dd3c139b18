//! Conversion between document records and the railway aggregate.
//!
//! Loading is lenient: a station repeating an earlier name, a ruler
//! repeating an earlier ruler name, a template node naming a station pair
//! that is not an interval, and an unparsable forbid time are each skipped
//! and reported to the diagnostic sink.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::error::JsonError;
use super::types::{
    ForbidNodeRecord, ForbidRecord, RailwayRecord, RulerNodeRecord, RulerRecord, StationRecord,
};
use crate::domain::{
    IntervalId, RailError, RailStation, RulerNode, StationName, format_hhmm, parse_hhmm,
};
use crate::railway::{
    Diagnostic, DiagnosticSink, ForbidView, Railway, RulerView, TemplateKind, TracingSink,
};

impl Railway {
    /// Build a railway from a JSON document value.
    pub fn from_json(value: &Value) -> Result<Railway, JsonError> {
        Self::from_json_with(value, &mut TracingSink)
    }

    /// [`from_json`](Self::from_json), reporting skipped entries to `sink`.
    pub fn from_json_with(
        value: &Value,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Railway, JsonError> {
        let record = RailwayRecord::deserialize(value)?;
        Ok(Self::from_record_with(&record, sink))
    }

    /// Build a railway from JSON text.
    pub fn from_json_str(s: &str) -> Result<Railway, JsonError> {
        Self::from_json_str_with(s, &mut TracingSink)
    }

    /// [`from_json_str`](Self::from_json_str), reporting skipped entries to `sink`.
    pub fn from_json_str_with(
        s: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Railway, JsonError> {
        let record: RailwayRecord = serde_json::from_str(s)?;
        Ok(Self::from_record_with(&record, sink))
    }

    /// Read and load a railway document file.
    pub fn from_json_file_with(
        path: impl AsRef<Path>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Railway, JsonError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str_with(&text, sink)
    }

    /// Serialize to a JSON document value.
    pub fn to_json(&self) -> Result<Value, JsonError> {
        Ok(serde_json::to_value(self.to_record())?)
    }

    /// Serialize to pretty-printed JSON text.
    pub fn to_json_string(&self) -> Result<String, JsonError> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    /// Build a railway from its document record, logging skipped entries.
    pub fn from_record(record: &RailwayRecord) -> Railway {
        Self::from_record_with(record, &mut TracingSink)
    }

    /// Build a railway from its document record.
    ///
    /// Two forbids are always created; an absent forbid record loads as an
    /// empty forbid.
    pub fn from_record_with(record: &RailwayRecord, sink: &mut dyn DiagnosticSink) -> Railway {
        let mut rail = Railway::new(record.name.clone());
        rail.notes = record.notes.clone();

        for st in &record.stations {
            match rail.append_station(station_from_record(st)) {
                Ok(_) => {}
                Err(RailError::DuplicateStation(name)) => {
                    sink.report(Diagnostic::DuplicateStation(name));
                }
                Err(e) => debug!(error = %e, "station skipped"),
            }
        }
        for ruler in &record.rulers {
            load_ruler(&mut rail, ruler, sink);
        }
        let default_forbid = ForbidRecord::default();
        for forbid in [&record.forbid, &record.forbid2] {
            load_forbid(&mut rail, forbid.as_ref().unwrap_or(&default_forbid), sink);
        }

        if let Some(name) = record.ordinate.as_deref() {
            if rail.set_ordinate_by_name(name).is_err() {
                debug!(ruler = name, "ordinate names no ruler, left unset");
            }
        }
        debug!(
            name = %rail.name(),
            stations = rail.station_count(),
            rulers = rail.ruler_count(),
            "railway loaded"
        );
        rail
    }

    /// The document record of this railway.
    ///
    /// Ruler nodes are written for every interval, down chain first; forbid
    /// nodes only where a window is set. Forbids past the second are not
    /// persisted.
    pub fn to_record(&self) -> RailwayRecord {
        let mut forbids = self.forbids().map(|f| forbid_record(self, f));
        RailwayRecord {
            name: self.name().to_string(),
            notes: self.notes.clone(),
            stations: self.stations().map(station_record).collect(),
            rulers: self.rulers().map(|r| ruler_record(self, r)).collect(),
            forbid: forbids.next(),
            forbid2: forbids.next(),
            ordinate: self.ordinate().map(|r| r.name().to_string()),
        }
    }
}

fn station_from_record(record: &StationRecord) -> RailStation {
    let mut station = RailStation::new(
        StationName::from_literal(&record.zhanming),
        record.licheng,
        record.dengji,
        record.counter,
        record.direction,
    );
    station.show = record.show;
    station
}

fn station_record(station: &RailStation) -> StationRecord {
    StationRecord {
        zhanming: station.name().to_literal(),
        licheng: station.mile,
        dengji: station.level,
        counter: station.counter,
        direction: station.direction(),
        show: station.show,
    }
}

fn load_ruler(rail: &mut Railway, record: &RulerRecord, sink: &mut dyn DiagnosticSink) {
    let index = match rail.add_empty_ruler(&record.name, record.different) {
        Ok(index) => index,
        Err(_) => {
            sink.report(Diagnostic::DuplicateRuler(record.name.clone()));
            return;
        }
    };
    for node in &record.nodes {
        let from = StationName::from_literal(&node.fazhan);
        let to = StationName::from_literal(&node.daozhan);
        match rail.ruler_node_between_mut(index, &from, &to) {
            Some(slot) => *slot = RulerNode::new(node.interval, node.start, node.stop),
            None => sink.report(Diagnostic::UnknownInterval {
                template: TemplateKind::Ruler(record.name.clone()),
                from,
                to,
            }),
        }
    }
    if !record.different {
        rail.mirror_ruler_up_nodes(index);
    }
}

fn load_forbid(rail: &mut Railway, record: &ForbidRecord, sink: &mut dyn DiagnosticSink) {
    let index = rail.add_empty_forbid(record.different);
    if let Some(forbid) = rail.forbid_mut(index) {
        forbid.down_show = record.down_show;
        forbid.up_show = record.up_show;
    }
    for node in &record.nodes {
        let from = StationName::from_literal(&node.fazhan);
        let to = StationName::from_literal(&node.daozhan);
        let begin = parse_window_bound(&node.begin, sink);
        let end = parse_window_bound(&node.end, sink);
        match rail.forbid_node_between_mut(index, &from, &to) {
            Some(slot) => {
                slot.begin = begin;
                slot.end = end;
            }
            None => sink.report(Diagnostic::UnknownInterval {
                template: TemplateKind::Forbid(index),
                from,
                to,
            }),
        }
    }
    if !record.different {
        rail.mirror_forbid_up_nodes(index);
    }
}

/// An empty bound is simply unset; anything else must be "hh:mm".
fn parse_window_bound(value: &str, sink: &mut dyn DiagnosticSink) -> Option<chrono::NaiveTime> {
    if value.is_empty() {
        return None;
    }
    match parse_hhmm(value) {
        Ok(time) => Some(time),
        Err(_) => {
            sink.report(Diagnostic::InvalidTime {
                value: value.to_string(),
            });
            None
        }
    }
}

/// Literal names of an interval's endpoints.
fn endpoints(rail: &Railway, id: IntervalId) -> Option<(String, String)> {
    let it = rail.interval(id)?;
    let from = rail.station(it.from_station())?.name().to_literal();
    let to = rail.station(it.to_station())?.name().to_literal();
    Some((from, to))
}

fn ruler_record(rail: &Railway, ruler: RulerView<'_>) -> RulerRecord {
    let nodes = rail
        .intervals_circ()
        .filter_map(|id| {
            let node = rail.interval(id)?.ruler_node(ruler.index())?;
            let (fazhan, daozhan) = endpoints(rail, id)?;
            Some(RulerNodeRecord {
                fazhan,
                daozhan,
                interval: node.interval,
                start: node.start,
                stop: node.stop,
            })
        })
        .collect();
    RulerRecord {
        name: ruler.name().to_string(),
        different: ruler.different(),
        nodes,
    }
}

fn forbid_record(rail: &Railway, forbid: ForbidView<'_>) -> ForbidRecord {
    let nodes = rail
        .intervals_circ()
        .filter_map(|id| {
            let node = rail.interval(id)?.forbid_node(forbid.index())?;
            let (begin, end) = (node.begin?, node.end?);
            let (fazhan, daozhan) = endpoints(rail, id)?;
            Some(ForbidNodeRecord {
                fazhan,
                daozhan,
                begin: format_hhmm(begin),
                end: format_hhmm(end),
            })
        })
        .collect();
    ForbidRecord {
        different: forbid.different(),
        down_show: forbid.down_show(),
        up_show: forbid.up_show(),
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, ForbidNode, PassedDirection};
    use serde_json::json;

    fn name(s: &str) -> StationName {
        StationName::from_literal(s)
    }

    fn document() -> Value {
        json!({
            "name": "Lanxin",
            "notes": {"author": "survey office", "version": "2", "note": ""},
            "stations": [
                {"zhanming": "Lanzhou", "licheng": 0.0, "dengji": 1},
                {"zhanming": "Hekou::South", "licheng": 12.5, "dengji": 4, "direction": 1},
                {"zhanming": "Haishiwan", "licheng": 30.0, "dengji": 3, "show": false},
                {"zhanming": "Hekou::South", "licheng": 99.0}
            ],
            "rulers": [
                {
                    "name": "express",
                    "different": false,
                    "nodes": [
                        {"fazhan": "Lanzhou", "daozhan": "Hekou::South", "interval": 420, "start": 60, "stop": 0},
                        {"fazhan": "Hekou::South", "daozhan": "Haishiwan", "interval": 600, "start": 0, "stop": 90},
                        {"fazhan": "Haishiwan", "daozhan": "Lanzhou", "interval": 980, "start": 0, "stop": 0},
                        {"fazhan": "Lanzhou", "daozhan": "Haishiwan", "interval": 1, "start": 0, "stop": 0}
                    ]
                },
                {"name": "express", "different": true, "nodes": []}
            ],
            "forbid": {
                "different": true,
                "downShow": true,
                "upShow": false,
                "nodes": [
                    {"fazhan": "Lanzhou", "daozhan": "Hekou::South", "begin": "23:30", "end": "01:10"},
                    {"fazhan": "Hekou::South", "daozhan": "Haishiwan", "begin": "9:00", "end": "10:00"}
                ]
            },
            "ordinate": "express"
        })
    }

    #[test]
    fn load_reports_and_skips_bad_entries() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let rail = Railway::from_json_with(&document(), &mut sink).unwrap();

        assert_eq!(rail.name(), "Lanxin");
        assert_eq!(rail.notes.author, "survey office");
        assert_eq!(rail.station_count(), 3);
        assert!(!rail.station_at(2).unwrap().show);
        assert_eq!(
            rail.station_at(1).unwrap().direction(),
            PassedDirection::DownVia
        );
        assert_eq!(rail.ruler_count(), 1);
        assert_eq!(rail.forbid_count(), 2);
        assert_eq!(rail.ordinate().unwrap().name(), "express");

        assert_eq!(
            sink,
            vec![
                Diagnostic::DuplicateStation(name("Hekou::South")),
                Diagnostic::UnknownInterval {
                    template: TemplateKind::Ruler("express".into()),
                    from: name("Lanzhou"),
                    to: name("Haishiwan"),
                },
                Diagnostic::DuplicateRuler("express".into()),
                Diagnostic::InvalidTime {
                    value: "9:00".into()
                },
            ]
        );
    }

    #[test]
    fn load_resolves_nodes_exactly() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let rail = Railway::from_json_with(&document(), &mut sink).unwrap();
        let ruler = rail.ruler(0).unwrap();
        assert_eq!(
            ruler.node_between(&name("Lanzhou"), &name("Hekou::South")),
            Some(&RulerNode::new(420, 60, 0))
        );
        assert_eq!(
            ruler.node_between(&name("Haishiwan"), &name("Lanzhou")),
            Some(&RulerNode::new(980, 0, 0))
        );

        let forbid = rail.forbid(0).unwrap();
        assert!(forbid.down_show());
        let window = forbid
            .node_between(&name("Lanzhou"), &name("Hekou::South"))
            .unwrap();
        assert_eq!(window.duration_min(), Some(100));
        assert!(forbid
            .node_between(&name("Hekou::South"), &name("Haishiwan"))
            .unwrap()
            .is_null());

        // absent second forbid loads empty
        let second = rail.forbid(1).unwrap();
        assert!(second.different());
        assert!(second.nodes(Direction::Down).all(|(_, n)| n.is_null()));
    }

    #[test]
    fn undifferentiated_ruler_mirrors_down_nodes() {
        let doc = json!({
            "name": "Mirror",
            "stations": [
                {"zhanming": "A", "licheng": 0.0},
                {"zhanming": "B", "licheng": 8.0}
            ],
            "rulers": [{
                "name": "same",
                "different": false,
                "nodes": [{"fazhan": "A", "daozhan": "B", "interval": 300, "start": 30, "stop": 40}]
            }],
            "ordinate": null
        });
        let rail = Railway::from_json(&doc).unwrap();
        let ruler = rail.ruler(0).unwrap();
        assert_eq!(
            ruler.node_between(&name("B"), &name("A")),
            Some(&RulerNode::new(300, 30, 40))
        );
        assert!(rail.ordinate().is_none());
    }

    #[test]
    fn round_trip_preserves_templates() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let rail = Railway::from_json_with(&document(), &mut sink).unwrap();
        let text = rail.to_json_string().unwrap();
        let mut again_sink: Vec<Diagnostic> = Vec::new();
        let again = Railway::from_json_str_with(&text, &mut again_sink).unwrap();

        assert!(again_sink.is_empty());
        assert_eq!(again.to_record(), rail.to_record());
        let names: Vec<_> = again.stations().map(|s| s.name().to_literal()).collect();
        assert_eq!(names, ["Lanzhou", "Hekou::South", "Haishiwan"]);
        assert_eq!(again.ordinate().unwrap().name(), "express");
    }

    #[test]
    fn record_shape() {
        let mut rail = Railway::new("Shape");
        rail.append_station(RailStation::new(name("A"), 0.0, 2, None, PassedDirection::BothVia))
            .unwrap();
        rail.append_station(RailStation::new(
            name("B::East"),
            5.5,
            3,
            Some(6.0),
            PassedDirection::UpVia,
        ))
        .unwrap();
        rail.add_empty_forbid(true);
        let value = rail.to_json().unwrap();

        assert_eq!(value["ordinate"], Value::Null);
        assert_eq!(value["stations"][0]["zhanming"], "A");
        assert!(value["stations"][0].get("counter").is_none());
        assert_eq!(value["stations"][1]["counter"], 6.0);
        assert_eq!(value["stations"][1]["direction"], 2);
        assert_eq!(value["forbid"]["downShow"], false);
        assert_eq!(value["forbid"]["nodes"], json!([]));
        assert!(value.get("forbid2").is_none());
    }

    #[test]
    fn null_forbid_nodes_are_not_written() {
        let mut rail = Railway::new("Windows");
        rail.append_station(RailStation::new(name("A"), 0.0, 0, None, PassedDirection::BothVia))
            .unwrap();
        rail.append_station(RailStation::new(name("B"), 5.0, 0, None, PassedDirection::BothVia))
            .unwrap();
        rail.add_empty_forbid(true);
        *rail
            .forbid_node_between_mut(0, &name("B"), &name("A"))
            .unwrap() = ForbidNode::new(parse_hhmm("02:00").unwrap(), parse_hhmm("03:30").unwrap());
        let record = rail.to_record();
        let nodes = &record.forbid.unwrap().nodes;
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].fazhan, "B");
        assert_eq!(nodes[0].begin, "02:00");
        assert_eq!(nodes[0].end, "03:30");
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(matches!(
            Railway::from_json_str("{\"stations\": 3}"),
            Err(JsonError::Json(_))
        ));
        assert!(matches!(
            Railway::from_json_file_with("/nonexistent/railway.json", &mut TracingSink),
            Err(JsonError::Io(_))
        ));
    }
}
