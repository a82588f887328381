//! Compound growth projection for a lump sum plus level monthly contributions

mod projector;
mod breakdown;

pub use projector::{project, GrowthTerms};
pub use breakdown::{GrowthProjection, GrowthYearRow};
