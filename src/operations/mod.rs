pub mod consolidate;
pub mod ingest;
pub mod transform;
