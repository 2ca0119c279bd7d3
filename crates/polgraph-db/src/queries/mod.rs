//! Database query implementations.

pub mod persons;
