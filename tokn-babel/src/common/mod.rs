//! Shared helpers for the output formats

pub mod ordering;

pub use ordering::{emission_order, NamedToken};
