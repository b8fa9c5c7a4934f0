use std::collections::HashMap;

use kml::types::{Coord, Geometry as KmlGeometry, LinearRing, MultiGeometry, Placemark};
use kml::{Kml, KmlDocument, KmlVersion, KmlWriter};
use log::debug;

use crate::domain::{Geometry, NamedShape, Polygon, Ring};
use crate::error::CodecError;

pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Write shapes as one KML document, one `<Placemark>` per shape.
///
/// Rings are written point for point in stored order; no closing point is
/// added. A multi-polygon becomes a `<MultiGeometry>` of `<Polygon>`s.
pub fn encode<'a>(
    shapes: impl IntoIterator<Item = &'a NamedShape>,
) -> Result<Vec<u8>, CodecError> {
    let placemarks: Vec<Kml> = shapes
        .into_iter()
        .map(|shape| {
            Kml::Placemark(Placemark {
                name: Some(shape.name.clone()),
                geometry: Some(encode_geometry(&shape.geometry)),
                ..Default::default()
            })
        })
        .collect();
    debug!("encoding {} placemarks", placemarks.len());

    let document = Kml::KmlDocument(KmlDocument {
        version: KmlVersion::V22,
        attrs: HashMap::from([("xmlns".to_string(), KML_NAMESPACE.to_string())]),
        elements: vec![Kml::Document {
            attrs: HashMap::new(),
            elements: placemarks,
        }],
    });

    let mut buffer = XML_DECLARATION.as_bytes().to_vec();
    KmlWriter::from_writer(&mut buffer).write(&document)?;

    Ok(buffer)
}

fn encode_geometry(geometry: &Geometry) -> KmlGeometry {
    match geometry {
        Geometry::Polygon(polygon) => KmlGeometry::Polygon(encode_polygon(polygon)),
        Geometry::MultiPolygon(polygons) => KmlGeometry::MultiGeometry(MultiGeometry {
            geometries: polygons
                .iter()
                .map(|p| KmlGeometry::Polygon(encode_polygon(p)))
                .collect(),
            ..Default::default()
        }),
    }
}

fn encode_polygon(polygon: &Polygon) -> kml::types::Polygon {
    kml::types::Polygon {
        outer: encode_ring(&polygon.outer),
        inner: polygon.holes.iter().map(encode_ring).collect(),
        ..Default::default()
    }
}

fn encode_ring(ring: &Ring) -> LinearRing {
    LinearRing {
        coords: ring
            .coords()
            .map(|c| Coord {
                x: c.x,
                y: c.y,
                z: None,
            })
            .collect(),
        ..Default::default()
    }
}
