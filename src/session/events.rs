use crate::domain::{Geometry, ShapeId};
use crate::pipeline::{ExportedFile, ImportReport};

/// Input coming from the drawing surface, the file picker or the shape list
#[derive(Debug, Clone)]
pub enum Event {
    /// A ring finished drawing, vertices as `(lon, lat)`
    DrawCreated {
        ring: Vec<(f64, f64)>,
        name: Option<String>,
    },
    /// Vertices of an existing shape were edited
    Edited { id: ShapeId, geometry: Geometry },
    Renamed { id: ShapeId, name: String },
    Deleted { id: ShapeId },
    /// A file was picked and read
    FileLoaded { file_name: String, contents: Vec<u8> },
    ExportRequested { id: ShapeId },
}

/// What a dispatched event did. Any outcome means the display should be
/// rebuilt from [`super::Session::panel`].
#[derive(Debug, Clone)]
pub enum Outcome {
    Added(ShapeId),
    Updated(ShapeId),
    /// `None` when the id was already gone
    Removed(Option<ShapeId>),
    Imported(ImportReport),
    Exported(ExportedFile),
    /// Nothing changed; the message is meant for the user
    Failed(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}
