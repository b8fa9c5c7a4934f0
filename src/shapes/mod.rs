pub mod collection;

pub use collection::{DEFAULT_NAME_PREFIX, ShapeCollection, round_km2};
