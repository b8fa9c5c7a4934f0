use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::codec::{self, KML_EXTENSION, KML_MIME_TYPE};
use crate::domain::NamedShape;
use crate::error::CodecError;

/// A KML document ready to be saved or downloaded
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: Vec<u8>,
}

impl ExportedFile {
    /// Save under `dir`, returning the written path. The file name must be a
    /// single path component.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let name = Path::new(&self.file_name);
        if name.file_name() != Some(name.as_os_str()) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to write outside {}: {:?}", dir.display(), self.file_name),
            ));
        }

        let path = dir.join(name);
        std::fs::write(&path, &self.contents)?;
        Ok(path)
    }
}

/// Encode a single shape as its own KML document
pub fn export(shape: &NamedShape) -> Result<ExportedFile, CodecError> {
    let contents = codec::encode([shape])?;
    let file_name = export_file_name(&shape.name);
    debug!("exported {:?} as {} ({} bytes)", shape.name, file_name, contents.len());

    Ok(ExportedFile {
        file_name,
        mime_type: KML_MIME_TYPE,
        contents,
    })
}

/// Shape name with each whitespace run turned into one `_`, plus `.kml`.
///
/// Path separators, drive colons, control characters and leading dots also
/// become `_`, so the result is always one plain file name.
pub fn export_file_name(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_whitespace = false;
    let mut leading = true;
    for c in name.chars() {
        let leading_dot = leading && c == '.';
        leading = leading_dot;

        if c.is_whitespace() {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
            continue;
        }

        in_whitespace = false;
        if leading_dot || matches!(c, '/' | '\\' | ':') || c.is_control() {
            stem.push('_');
        } else {
            stem.push(c);
        }
    }

    format!("{}.{}", stem, KML_EXTENSION)
}
