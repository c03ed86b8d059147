//! Infrastructure layer handling persistence and data export.

pub mod persistence;

pub use persistence::*;
