//! Polgraph Core Library
//!
//! Political person records, their validated graph representation, and the
//! mapping between the two.

pub mod error;
pub mod graph;
pub mod person;
pub mod slug;

pub use error::{PolgraphError, PolgraphResult};
