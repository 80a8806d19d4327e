mod crs;
mod set;

pub use crs::Crs;
pub use set::{Footprint, FootprintId, FootprintSet};
