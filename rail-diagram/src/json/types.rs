//! Persisted railway document records.
//!
//! These types map directly to the JSON document. Station pairs are
//! stored as name literals (`fazhan` from, `daozhan` to) and resolved to
//! intervals on load.

use serde::{Deserialize, Serialize};

use crate::domain::PassedDirection;
use crate::railway::RailInfoNote;

/// A whole railway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RailwayRecord {
    pub name: String,

    pub notes: RailInfoNote,

    /// Stations in sequence order.
    pub stations: Vec<StationRecord>,

    pub rulers: Vec<RulerRecord>,

    /// First forbid template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forbid: Option<ForbidRecord>,

    /// Second forbid template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forbid2: Option<ForbidRecord>,

    /// Name of the ruler used for layout; written as null when unset.
    pub ordinate: Option<String>,
}

/// One station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Name literal, `"station"` or `"station::field"`.
    #[serde(default)]
    pub zhanming: String,

    /// Mileage in kilometres.
    #[serde(default)]
    pub licheng: f64,

    /// Display level; smaller is more important.
    #[serde(default)]
    pub dengji: i32,

    /// Up-direction mileage, when measured separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<f64>,

    #[serde(default)]
    pub direction: PassedDirection,

    #[serde(default = "default_true")]
    pub show: bool,
}

/// One ruler with its nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulerRecord {
    pub name: String,
    pub different: bool,
    pub nodes: Vec<RulerNodeRecord>,
}

/// Pass-through seconds plus start and stop allowances on one interval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulerNodeRecord {
    pub fazhan: String,
    pub daozhan: String,
    pub interval: u32,
    pub start: u32,
    pub stop: u32,
}

/// One forbid with its nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForbidRecord {
    #[serde(default = "default_true")]
    pub different: bool,

    #[serde(default)]
    pub down_show: bool,

    #[serde(default)]
    pub up_show: bool,

    #[serde(default)]
    pub nodes: Vec<ForbidNodeRecord>,
}

impl Default for ForbidRecord {
    fn default() -> Self {
        Self {
            different: true,
            down_show: false,
            up_show: false,
            nodes: Vec::new(),
        }
    }
}

/// A maintenance window on one interval, as "hh:mm" strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForbidNodeRecord {
    pub fazhan: String,
    pub daozhan: String,
    pub begin: String,
    pub end: String,
}

/// A named tree of railways.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRecord {
    pub name: String,
    pub rails: Vec<RailwayRecord>,
    pub subcats: Vec<CategoryRecord>,
}

fn default_true() -> bool {
    true
}
