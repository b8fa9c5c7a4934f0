//! KML reading and writing for named polygon shapes

pub mod decode;
pub mod encode;

pub use decode::{DecodedFeature, FeatureGeometry, GeometryKind, decode};
pub use encode::{KML_NAMESPACE, encode};

/// Extension used for exported files
pub const KML_EXTENSION: &str = "kml";

pub const KML_MIME_TYPE: &str = "application/vnd.google-earth.kml+xml";
