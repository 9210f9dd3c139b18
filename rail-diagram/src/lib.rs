//! Railway timetable diagram topology engine.
//!
//! A [`Railway`] is an ordered line of stations linked into a down chain
//! and an up chain of intervals. Ruler templates give running times per
//! interval and forbid templates give maintenance windows. The engine
//! keeps both chains consistent under editing, finds paths between
//! stations, and computes the vertical layout of a timetable diagram.

pub mod category;
pub mod config;
pub mod domain;
pub mod json;
pub mod railway;

pub use railway::Railway;
