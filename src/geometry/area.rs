//! Geodesic area of polygon shapes
//!
//! Areas are computed on a sphere with the WGS84 equatorial radius using the
//! Chamberlain-Duquette spherical excess formula, directly on lon/lat pairs.
//! No projection is involved, so the result holds at any latitude and for
//! large shapes.
//!
//! Only outer rings contribute: holes are not subtracted, and components of
//! a multi-polygon are summed even when they overlap.

use geo::ChamberlainDuquetteArea;

use crate::domain::{Geometry, Ring};

const SQUARE_METERS_PER_SQUARE_KM: f64 = 1_000_000.0;

/// Area of a geometry in km², always >= 0
pub fn area_km2(geometry: &Geometry) -> f64 {
    let square_meters: f64 = geometry.outer_rings().map(ring_area_m2).sum();
    square_meters / SQUARE_METERS_PER_SQUARE_KM
}

/// Unsigned area enclosed by a ring, in m²
///
/// The ring is closed implicitly. Rings with fewer than 3 distinct points
/// enclose nothing and yield 0.
pub fn ring_area_m2(ring: &Ring) -> f64 {
    if distinct_points(ring) < 3 {
        return 0.0;
    }

    // geo closes the exterior itself; the ring we hold stays untouched
    let polygon = geo::Polygon::new(ring.clone(), vec![]);
    polygon.chamberlain_duquette_unsigned_area()
}

/// Count of points ignoring consecutive repeats and a closing duplicate
fn distinct_points(ring: &Ring) -> usize {
    let mut count = 0;
    let mut previous = None;
    for coord in ring.coords() {
        if previous != Some(coord) {
            count += 1;
        }
        previous = Some(coord);
    }

    if count > 1 && ring.0.first() == ring.0.last() {
        count -= 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Polygon;

    const EARTH_RADIUS_M: f64 = 6_378_137.0;

    /// Exact area of a lon/lat aligned cell on the sphere, in km²
    fn spherical_cell_km2(lon_span_deg: f64, south_deg: f64, north_deg: f64) -> f64 {
        let lat_term = north_deg.to_radians().sin() - south_deg.to_radians().sin();
        EARTH_RADIUS_M * EARTH_RADIUS_M * lon_span_deg.to_radians() * lat_term / 1e6
    }

    fn square() -> Vec<(f64, f64)> {
        vec![(0.0, -0.5), (1.0, -0.5), (1.0, 0.5), (0.0, 0.5)]
    }

    #[test]
    fn test_degenerate_rings_have_zero_area() {
        let empty = Geometry::Polygon(Polygon::from_lon_lat(&[]));
        let one = Geometry::Polygon(Polygon::from_lon_lat(&[(10.0, 10.0)]));
        let two = Geometry::Polygon(Polygon::from_lon_lat(&[(10.0, 10.0), (11.0, 10.0)]));
        let repeated = Geometry::Polygon(Polygon::from_lon_lat(&[
            (10.0, 10.0),
            (11.0, 10.0),
            (11.0, 10.0),
            (10.0, 10.0),
        ]));

        assert_eq!(area_km2(&empty), 0.0);
        assert_eq!(area_km2(&one), 0.0);
        assert_eq!(area_km2(&two), 0.0);
        assert_eq!(area_km2(&repeated), 0.0);
    }

    #[test]
    fn test_one_degree_square_at_equator() {
        let geometry = Geometry::Polygon(Polygon::from_lon_lat(&square()));
        let expected = spherical_cell_km2(1.0, -0.5, 0.5);

        let area = area_km2(&geometry);
        // roughly 12 392 km²
        assert!((area - 12_392.0).abs() < 5.0, "area = {area}");
        assert!((area - expected).abs() / expected < 0.005);
    }

    #[test]
    fn test_area_holds_at_high_latitude() {
        let geometry = Geometry::Polygon(Polygon::from_lon_lat(&[
            (10.0, 60.0),
            (11.0, 60.0),
            (11.0, 61.0),
            (10.0, 61.0),
        ]));
        let expected = spherical_cell_km2(1.0, 60.0, 61.0);

        assert!((area_km2(&geometry) - expected).abs() / expected < 0.005);
    }

    #[test]
    fn test_area_ignores_start_point_and_direction() {
        let base = area_km2(&Geometry::Polygon(Polygon::from_lon_lat(&square())));

        let mut rotated = square();
        rotated.rotate_left(2);
        let mut reversed = square();
        reversed.reverse();

        let rotated = area_km2(&Geometry::Polygon(Polygon::from_lon_lat(&rotated)));
        let reversed = area_km2(&Geometry::Polygon(Polygon::from_lon_lat(&reversed)));

        assert!((rotated - base).abs() < 1e-6 * base);
        assert!((reversed - base).abs() < 1e-6 * base);
        assert!(reversed > 0.0);
    }

    #[test]
    fn test_closing_duplicate_does_not_change_area() {
        let mut closed = square();
        closed.push(closed[0]);

        let open = area_km2(&Geometry::Polygon(Polygon::from_lon_lat(&square())));
        let closed = area_km2(&Geometry::Polygon(Polygon::from_lon_lat(&closed)));
        assert!((open - closed).abs() < 1e-9 * open);
    }

    #[test]
    fn test_holes_are_not_subtracted() {
        let hole =
            Polygon::from_lon_lat(&[(0.25, -0.25), (0.75, -0.25), (0.75, 0.25), (0.25, 0.25)])
                .outer;
        let solid = Polygon::from_lon_lat(&square());
        let holed = Polygon::with_holes(solid.outer.clone(), vec![hole]);

        assert_eq!(
            area_km2(&Geometry::Polygon(solid)),
            area_km2(&Geometry::Polygon(holed))
        );
    }

    #[test]
    fn test_multipolygon_sums_components() {
        let a = Polygon::from_lon_lat(&square());
        let b = Polygon::from_lon_lat(&[(20.0, 10.0), (21.0, 10.0), (21.0, 11.0), (20.0, 11.0)]);

        let single_a = area_km2(&Geometry::Polygon(a.clone()));
        let single_b = area_km2(&Geometry::Polygon(b.clone()));
        let multi = area_km2(&Geometry::MultiPolygon(vec![a.clone(), b]));
        assert!((multi - (single_a + single_b)).abs() < 1e-6);

        // overlapping components are counted twice
        let doubled = area_km2(&Geometry::MultiPolygon(vec![a.clone(), a]));
        assert!((doubled - 2.0 * single_a).abs() < 1e-6);
    }
}
