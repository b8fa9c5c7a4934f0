use geo::{Coord, LineString};
use serde::Serialize;

/// A WGS84 position: `x` is longitude, `y` is latitude, both in degrees
pub type Point = Coord<f64>;

/// A polygon boundary in the order it was drawn or read.
///
/// Rings are never closed automatically, so a closing duplicate point is
/// present only if the source geometry had one.
pub type Ring = LineString<f64>;

/// One outer boundary plus optional holes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(outer: Ring) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(outer: Ring, holes: Vec<Ring>) -> Self {
        Self { outer, holes }
    }

    /// Build a polygon from `(lon, lat)` pairs
    pub fn from_lon_lat(points: &[(f64, f64)]) -> Self {
        Self::new(
            points
                .iter()
                .map(|&(lon, lat)| geo::coord! { x: lon, y: lat })
                .collect(),
        )
    }
}

/// The geometry kinds a shape may carry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum Geometry {
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
}

impl Geometry {
    /// Every component polygon, in order
    pub fn polygons(&self) -> &[Polygon] {
        match self {
            Geometry::Polygon(polygon) => std::slice::from_ref(polygon),
            Geometry::MultiPolygon(polygons) => polygons,
        }
    }

    /// Outer rings of every component polygon
    pub fn outer_rings(&self) -> impl Iterator<Item = &Ring> {
        self.polygons().iter().map(|p| &p.outer)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

impl From<Polygon> for Geometry {
    fn from(polygon: Polygon) -> Self {
        Geometry::Polygon(polygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lon_lat_keeps_order_and_does_not_close() {
        let polygon = Polygon::from_lon_lat(&[(-51.0, -14.0), (-50.0, -14.0), (-50.0, -13.0)]);
        assert_eq!(polygon.outer.0.len(), 3);
        assert_eq!(polygon.outer.0[0].x, -51.0);
        assert_eq!(polygon.outer.0[0].y, -14.0);
        assert!(polygon.holes.is_empty());
    }

    #[test]
    fn test_polygons_of_multipolygon() {
        let a = Polygon::from_lon_lat(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let b = Polygon::from_lon_lat(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0)]);
        let geometry = Geometry::MultiPolygon(vec![a.clone(), b]);

        assert_eq!(geometry.polygons().len(), 2);
        assert_eq!(geometry.outer_rings().count(), 2);
        assert_eq!(Geometry::from(a).polygons().len(), 1);
    }
}
