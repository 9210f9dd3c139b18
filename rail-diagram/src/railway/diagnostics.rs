//! Recoverable anomalies reported by railway operations.
//!
//! Loading, layout and pathfinding degrade gracefully instead of failing.
//! What they skipped or fell back on is reported to a [`DiagnosticSink`]
//! supplied by the caller.

use std::fmt;

use tracing::warn;

use crate::domain::StationName;

/// Which template a diagnostic refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateKind {
    Ruler(String),
    Forbid(usize),
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateKind::Ruler(name) => write!(f, "ruler {name:?}"),
            TemplateKind::Forbid(index) => write!(f, "forbid #{index}"),
        }
    }
}

/// A recoverable anomaly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A template node named a station pair that is not an interval; the
    /// node was dropped.
    UnknownInterval {
        template: TemplateKind,
        from: StationName,
        to: StationName,
    },

    /// A station repeated an existing name; it was dropped.
    DuplicateStation(StationName),

    /// A ruler repeated an existing name; it was dropped.
    DuplicateRuler(String),

    /// A forbid window bound could not be parsed; it was left unset.
    InvalidTime { value: String },

    /// The ordinate ruler has a null node; layout fell back to mileage and
    /// the ordinate was reset.
    IncompleteOrdinate {
        ruler: String,
        from: StationName,
        to: StationName,
    },

    /// An up-only station has no both-direction station on one side; layout
    /// fell back to mileage and the ordinate was reset.
    MissingBothAnchor(StationName),

    /// Pathfinding guessed the wrong direction from mileage and retried the
    /// other way.
    PathDirectionRetry { from: StationName, to: StationName },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownInterval { template, from, to } => {
                write!(f, "{template}: no interval {from} -> {to}, node ignored")
            }
            Diagnostic::DuplicateStation(name) => {
                write!(f, "duplicate station {name} ignored")
            }
            Diagnostic::DuplicateRuler(name) => write!(f, "duplicate ruler {name:?} ignored"),
            Diagnostic::InvalidTime { value } => {
                write!(f, "invalid forbid time {value:?}, left unset")
            }
            Diagnostic::IncompleteOrdinate { ruler, from, to } => write!(
                f,
                "ruler {ruler:?} incomplete at {from} -> {to}, cannot be used as ordinate"
            ),
            Diagnostic::MissingBothAnchor(name) => write!(
                f,
                "no both-direction station around {name}, cannot lay out by ruler"
            ),
            Diagnostic::PathDirectionRetry { from, to } => {
                write!(f, "direction guess wrong for {from} -> {to}, retried reversed")
            }
        }
    }
}

/// Receiver for diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics for later inspection.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Emits every diagnostic as a `tracing` warning.
///
/// This is the sink used by the operations without a `_with` suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        warn!(%diagnostic, "railway diagnostic");
    }
}
