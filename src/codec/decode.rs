use geo::coord;
use kml::Kml;
use kml::types::{Geometry as KmlGeometry, LinearRing, MultiGeometry, Placemark};
use log::debug;

use crate::domain::{Geometry, Polygon, Ring};
use crate::error::CodecError;

/// Kind of geometry found on a placemark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Polygon,
    MultiPolygon,
    Point,
    LineString,
    LinearRing,
    /// MultiGeometry mixing polygons with other kinds
    GeometryCollection,
    Unknown,
}

/// Geometry of a decoded placemark. Non-polygonal kinds are reported but
/// not converted; deciding what to do with them is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Shape(Geometry),
    Other(GeometryKind),
}

impl FeatureGeometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            FeatureGeometry::Shape(Geometry::Polygon(_)) => GeometryKind::Polygon,
            FeatureGeometry::Shape(Geometry::MultiPolygon(_)) => GeometryKind::MultiPolygon,
            FeatureGeometry::Other(kind) => *kind,
        }
    }

    pub fn into_shape(self) -> Option<Geometry> {
        match self {
            FeatureGeometry::Shape(geometry) => Some(geometry),
            FeatureGeometry::Other(_) => None,
        }
    }
}

/// One geometry-bearing placemark
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFeature {
    /// Trimmed `<name>`, `None` when missing or blank
    pub name: Option<String>,
    pub geometry: FeatureGeometry,
}

/// Parse a KML document into its placemarks, in document order.
///
/// Placemarks are collected from the root, `<Document>` and any nesting of
/// `<Folder>`s; placemarks without a geometry are skipped. A well-formed
/// document without placemarks decodes to an empty list.
pub fn decode(buffer: &[u8]) -> Result<Vec<DecodedFeature>, CodecError> {
    let text = std::str::from_utf8(buffer)
        .map_err(|e| CodecError::MalformedDocument(format!("not UTF-8 text: {}", e)))?;
    let text = text.trim_start_matches('\u{feff}').trim_start();
    if !text.starts_with('<') {
        return Err(CodecError::MalformedDocument(
            "not an XML document".to_string(),
        ));
    }

    let root = text
        .parse::<Kml>()
        .map_err(|e: kml::Error| CodecError::MalformedDocument(e.to_string()))?;

    if !is_kml_container(&root) {
        return Err(CodecError::MalformedDocument(
            "no <kml>, <Document>, <Folder> or <Placemark> element".to_string(),
        ));
    }

    let mut features = Vec::new();
    collect_features(&root, &mut features);
    debug!("decoded {} placemarks with geometry", features.len());

    Ok(features)
}

fn is_kml_container(node: &Kml) -> bool {
    matches!(
        node,
        Kml::KmlDocument(_) | Kml::Document { .. } | Kml::Folder { .. } | Kml::Placemark(_)
    )
}

fn collect_features(node: &Kml, features: &mut Vec<DecodedFeature>) {
    match node {
        Kml::KmlDocument(document) => {
            for element in &document.elements {
                collect_features(element, features);
            }
        }
        Kml::Document { elements, .. } => {
            for element in elements {
                collect_features(element, features);
            }
        }
        Kml::Folder { elements, .. } => {
            for element in elements {
                collect_features(element, features);
            }
        }
        Kml::Placemark(placemark) => {
            if let Some(feature) = decode_placemark(placemark) {
                features.push(feature);
            }
        }
        _ => {}
    }
}

fn decode_placemark(placemark: &Placemark) -> Option<DecodedFeature> {
    let name = placemark
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let Some(geometry) = &placemark.geometry else {
        debug!("skipping placemark {:?} without geometry", name);
        return None;
    };

    Some(DecodedFeature {
        name,
        geometry: decode_geometry(geometry),
    })
}

fn decode_geometry(geometry: &KmlGeometry) -> FeatureGeometry {
    match geometry {
        KmlGeometry::Polygon(polygon) => FeatureGeometry::Shape(Geometry::Polygon(
            Polygon::with_holes(
                decode_ring(&polygon.outer),
                polygon.inner.iter().map(decode_ring).collect(),
            ),
        )),
        KmlGeometry::MultiGeometry(multi) => {
            let mut polygons = Vec::new();
            if flatten_polygons(multi, &mut polygons) && !polygons.is_empty() {
                FeatureGeometry::Shape(Geometry::MultiPolygon(polygons))
            } else {
                FeatureGeometry::Other(GeometryKind::GeometryCollection)
            }
        }
        KmlGeometry::Point(_) => FeatureGeometry::Other(GeometryKind::Point),
        KmlGeometry::LineString(_) => FeatureGeometry::Other(GeometryKind::LineString),
        KmlGeometry::LinearRing(_) => FeatureGeometry::Other(GeometryKind::LinearRing),
        _ => FeatureGeometry::Other(GeometryKind::Unknown),
    }
}

/// Collect the polygons of a (possibly nested) MultiGeometry. Returns false
/// as soon as a member is not a polygon.
fn flatten_polygons(multi: &MultiGeometry, polygons: &mut Vec<Polygon>) -> bool {
    for member in &multi.geometries {
        match decode_geometry(member) {
            FeatureGeometry::Shape(Geometry::Polygon(polygon)) => polygons.push(polygon),
            FeatureGeometry::Shape(Geometry::MultiPolygon(nested)) => polygons.extend(nested),
            FeatureGeometry::Other(_) => return false,
        }
    }
    true
}

/// Altitude is dropped; point order is kept as written
fn decode_ring(ring: &LinearRing) -> Ring {
    ring.coords
        .iter()
        .map(|c| coord! { x: c.x, y: c.y })
        .collect()
}
