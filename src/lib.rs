//! Rebuild plan-item hierarchies from flat, possibly inconsistent lists
//! and group them by activity type or day by day.

pub mod cli;
pub mod group;
pub mod io;
pub mod model;
pub mod ops;
