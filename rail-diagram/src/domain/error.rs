//! Domain error types.
//!
//! These errors represent rejected mutations on a railway. Lookups never
//! produce them; a lookup miss is an empty `Option`.

use super::StationName;

/// Errors returned by railway mutations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RailError {
    /// A station with exactly this name is already on the railway
    #[error("station {0} already exists")]
    DuplicateStation(StationName),

    /// No station with exactly this name
    #[error("station {0} not found")]
    StationNotFound(StationName),

    /// Sequence position past the end of the station list
    #[error("station index {index} out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// A ruler with this name is already on the railway
    #[error("ruler {0:?} already exists")]
    DuplicateRuler(String),

    /// No ruler with this name or index
    #[error("ruler {0:?} not found")]
    RulerNotFound(String),

    /// No forbid at this index
    #[error("forbid {0} not found")]
    ForbidNotFound(usize),
}
