pub mod geometry;
pub mod shape;

pub use geometry::{Geometry, Point, Polygon, Ring};
pub use shape::{NamedShape, ShapeId};
