//! Consolidation of overlapping building footprints into axis-aligned
//! bounding rectangles.
//!
//! The usual pipeline is: [`Ingest`](operations::ingest::Ingest) outlines for
//! a query rectangle, replace them by their envelopes with
//! [`DeriveEnvelopes`](operations::transform::DeriveEnvelopes), then run
//! [`Consolidate`](operations::consolidate::Consolidate) until no pair
//! overlaps above the threshold.

pub mod error;
pub mod footprint;
pub mod frame;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod projection;
pub mod provider;

pub use error::{FootprintError, Result};
