//! The active editing session: one owner for the shape collection and the
//! name of the file it was last loaded from.

pub mod events;

pub use events::{Event, Outcome};

use log::warn;
use serde::Serialize;
use std::fmt;

use crate::domain::{Geometry, Polygon, ShapeId};
use crate::error::CollectionError;
use crate::pipeline;
use crate::shapes::{ShapeCollection, round_km2};

/// One line of the shape list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRow {
    pub id: ShapeId,
    pub name: String,
    pub area_km2: f64,
}

/// Everything the info panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSummary {
    pub total_area_km2: f64,
    pub file_name: Option<String>,
    pub rows: Vec<PanelRow>,
    /// The panel is hidden while there are no shapes
    pub visible: bool,
}

impl fmt::Display for PanelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{} - {:.3} km²", row.name, row.area_km2)?;
        }
        write!(f, "Total area: {:.3} km²", self.total_area_km2)?;
        if let Some(file_name) = &self.file_name {
            write!(f, "\nFile: {}", file_name)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Session {
    shapes: ShapeCollection,
    current_file_name: Option<String>,
}

impl Session {
    pub fn new(shapes: ShapeCollection) -> Self {
        Self {
            shapes,
            current_file_name: None,
        }
    }

    pub fn shapes(&self) -> &ShapeCollection {
        &self.shapes
    }

    /// Name of the last successfully imported file
    pub fn current_file_name(&self) -> Option<&str> {
        self.current_file_name.as_deref()
    }

    /// Run the core operation behind an event. Failures are reported in the
    /// returned [`Outcome`] and never change state.
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        match event {
            Event::DrawCreated { ring, name } => {
                let geometry = Geometry::Polygon(Polygon::from_lon_lat(&ring));
                Outcome::Added(self.shapes.add(geometry, name.as_deref()).id)
            }
            Event::Edited { id, geometry } => match self.shapes.replace_geometry(id, geometry) {
                Ok(()) => Outcome::Updated(id),
                Err(e) => Outcome::Failed(e.to_string()),
            },
            Event::Renamed { id, name } => match self.shapes.rename(id, &name) {
                Ok(()) => Outcome::Updated(id),
                Err(e) => Outcome::Failed(e.to_string()),
            },
            Event::Deleted { id } => Outcome::Removed(self.shapes.remove(id).map(|s| s.id)),
            Event::FileLoaded {
                file_name,
                contents,
            } => match pipeline::import(&mut self.shapes, &contents, &file_name) {
                Ok(report) => {
                    self.current_file_name = Some(report.file_name.clone());
                    Outcome::Imported(report)
                }
                Err(e) => {
                    warn!("import of {} failed: {}", file_name, e);
                    Outcome::Failed(e.to_string())
                }
            },
            Event::ExportRequested { id } => {
                let Some(shape) = self.shapes.get(id) else {
                    return Outcome::Failed(CollectionError::NotFound(id).to_string());
                };
                match pipeline::export(shape) {
                    Ok(file) => Outcome::Exported(file),
                    Err(e) => Outcome::Failed(e.to_string()),
                }
            }
        }
    }

    pub fn panel(&self) -> PanelSummary {
        let rows: Vec<PanelRow> = self
            .shapes
            .iter()
            .map(|shape| PanelRow {
                id: shape.id,
                name: shape.name.clone(),
                area_km2: round_km2(shape.area_km2()),
            })
            .collect();

        PanelSummary {
            total_area_km2: self.shapes.total_area_km2(),
            file_name: self.current_file_name.clone(),
            visible: !rows.is_empty(),
            rows,
        }
    }
}
