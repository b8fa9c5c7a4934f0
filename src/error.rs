use thiserror::Error;

use crate::domain::ShapeId;

/// Errors raised while reading or writing a KML document
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    #[error("failed to write KML: {0}")]
    Write(#[from] kml::Error),
}

/// Errors raised by operations on a [`crate::shapes::ShapeCollection`]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CollectionError {
    #[error("no shape with id {0}")]
    NotFound(ShapeId),
    #[error("shape name must not be empty")]
    EmptyName,
}

/// Outcome of a rejected import. The collection is left untouched whenever
/// one of these is returned.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("file is not a valid KML document: {0}")]
    Malformed(#[source] CodecError),
    #[error("file does not contain any geometry to import")]
    Empty,
    #[error("file does not contain any polygon to import")]
    NoPolygons,
}
