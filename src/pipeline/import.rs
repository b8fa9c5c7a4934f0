use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use crate::codec;
use crate::error::ImportError;
use crate::shapes::ShapeCollection;

/// Summary of a successful import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported_count: usize,
    pub file_name: String,
}

/// Replace the collection with the polygons of a KML document.
///
/// Everything is decoded and filtered before the collection is touched, so
/// any error leaves the previous shapes in place. On success the previous
/// shapes are dropped; imports never merge.
pub fn import(
    collection: &mut ShapeCollection,
    contents: &[u8],
    file_name: &str,
) -> Result<ImportReport, ImportError> {
    let features = codec::decode(contents).map_err(ImportError::Malformed)?;
    if features.is_empty() {
        return Err(ImportError::Empty);
    }

    let found = features.len();
    let accepted: Vec<_> = features
        .into_iter()
        .filter_map(|feature| {
            let kind = feature.geometry.kind();
            match feature.geometry.into_shape() {
                Some(geometry) => Some((feature.name, geometry)),
                None => {
                    debug!("ignoring {:?} placemark {:?}", kind, feature.name);
                    None
                }
            }
        })
        .collect();

    if accepted.is_empty() {
        return Err(ImportError::NoPolygons);
    }

    collection.clear();
    for (name, geometry) in accepted {
        collection.add(geometry, name.as_deref());
    }

    info!(
        "imported {} of {} placemarks from {}",
        collection.len(),
        found,
        file_name
    );

    Ok(ImportReport {
        imported_count: collection.len(),
        file_name: file_name.to_string(),
    })
}

/// Read a file from disk and [`import`] it under its file name
pub fn import_file(
    collection: &mut ShapeCollection,
    path: &Path,
) -> Result<ImportReport, ImportError> {
    let contents = std::fs::read(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    import(collection, &contents, &file_name)
}
