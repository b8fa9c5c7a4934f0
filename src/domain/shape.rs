use serde::Serialize;
use std::fmt;

use super::Geometry;

/// Identifier of a shape, stable for the lifetime of its collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A polygon or multi-polygon with the name shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedShape {
    pub id: ShapeId,
    pub name: String,
    pub geometry: Geometry,
}

impl NamedShape {
    /// Surrounding whitespace is stripped from `name`
    pub fn new(id: ShapeId, name: impl Into<String>, geometry: Geometry) -> Self {
        let mut name = name.into();
        let trimmed = name.trim();
        if trimmed.len() != name.len() {
            name = trimmed.to_string();
        }

        Self { id, name, geometry }
    }

    /// Geodesic area in km²
    pub fn area_km2(&self) -> f64 {
        crate::geometry::area_km2(&self.geometry)
    }
}
