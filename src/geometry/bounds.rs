use serde::Serialize;

use crate::domain::Point;

/// Lon/lat bounding box in WGS84 degrees
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Create bounds from a set of points
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;

        let mut bounds = Self {
            min_lon: first.x,
            max_lon: first.x,
            min_lat: first.y,
            max_lat: first.y,
        };
        bounds.expand(points);
        Some(bounds)
    }

    /// Expand bounds to include another set of points
    pub fn expand<'a>(&mut self, points: impl IntoIterator<Item = &'a Point>) {
        for point in points {
            self.min_lon = self.min_lon.min(point.x);
            self.max_lon = self.max_lon.max(point.x);
            self.min_lat = self.min_lat.min(point.y);
            self.max_lat = self.max_lat.max(point.y);
        }
    }

    /// Grow to cover another box
    pub fn union(&mut self, other: &Bounds) {
        self.min_lon = self.min_lon.min(other.min_lon);
        self.max_lon = self.max_lon.max(other.max_lon);
        self.min_lat = self.min_lat.min(other.min_lat);
        self.max_lat = self.max_lat.max(other.max_lat);
    }

    /// (lon, lat) of the box center
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn test_bounds_from_points() {
        let points = vec![
            coord! { x: -52.0, y: -15.0 },
            coord! { x: -50.0, y: -13.0 },
            coord! { x: -51.0, y: -14.0 },
        ];
        let bounds = Bounds::from_points(&points).unwrap();

        assert_eq!(bounds.min_lon, -52.0);
        assert_eq!(bounds.max_lon, -50.0);
        assert_eq!(bounds.min_lat, -15.0);
        assert_eq!(bounds.max_lat, -13.0);
        assert_eq!(bounds.center(), (-51.0, -14.0));
    }

    #[test]
    fn test_bounds_empty() {
        let points: Vec<Point> = Vec::new();
        assert!(Bounds::from_points(&points).is_none());
    }

    #[test]
    fn test_bounds_union() {
        let mut a = Bounds::from_points(&[coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }])
            .unwrap();
        let b = Bounds::from_points(&[coord! { x: 5.0, y: -2.0 }]).unwrap();
        a.union(&b);

        assert_eq!(a.max_lon, 5.0);
        assert_eq!(a.min_lat, -2.0);
        assert_eq!(a.min_lon, 0.0);
        assert_eq!(a.max_lat, 1.0);
    }
}
