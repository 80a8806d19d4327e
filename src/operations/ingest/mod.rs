mod fetch;

pub use fetch::Ingest;
