mod envelope;
mod reproject;

pub use envelope::DeriveEnvelopes;
pub use reproject::{Direction, Reproject};
