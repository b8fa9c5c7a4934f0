pub mod area;
pub mod bounds;

pub use area::{area_km2, ring_area_m2};
pub use bounds::Bounds;
