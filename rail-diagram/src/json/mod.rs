//! JSON persistence of railways.
//!
//! A railway document holds the station list, every ruler with one node
//! per interval, two forbid templates and the name of the ordinate ruler.
//! Key characteristics of the format:
//! - Stations are keyed by name literal; template nodes refer to intervals
//!   by their `fazhan`/`daozhan` station pair
//! - Station pass directions are integer codes 0 to 3
//! - Forbid window bounds are "hh:mm" strings; an empty string is unset
//! - Loading never fails on content: bad entries are skipped and reported
//!   to a [`DiagnosticSink`](crate::railway::DiagnosticSink)

mod convert;
mod error;
mod types;

pub use error::JsonError;
pub use types::{
    CategoryRecord, ForbidNodeRecord, ForbidRecord, RailwayRecord, RulerNodeRecord, RulerRecord,
    StationRecord,
};
