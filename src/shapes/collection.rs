use std::collections::BTreeMap;

use log::debug;

use crate::domain::{Geometry, NamedShape, ShapeId};
use crate::error::CollectionError;
use crate::geometry::Bounds;

pub const DEFAULT_NAME_PREFIX: &str = "Polígono";

/// Ordered set of the shapes currently loaded or drawn.
///
/// Ids grow monotonically and are never reused, so iterating the map by id
/// yields insertion order.
#[derive(Debug, Clone)]
pub struct ShapeCollection {
    shapes: BTreeMap<ShapeId, NamedShape>,
    next_id: u64,
    name_prefix: String,
}

impl Default for ShapeCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeCollection {
    pub fn new() -> Self {
        Self::with_name_prefix(DEFAULT_NAME_PREFIX)
    }

    /// Collection whose unnamed shapes are called "{prefix} N"
    pub fn with_name_prefix(prefix: impl Into<String>) -> Self {
        Self {
            shapes: BTreeMap::new(),
            next_id: 1,
            name_prefix: prefix.into(),
        }
    }

    /// Insert a shape at the end of the collection.
    ///
    /// A blank `suggested_name` falls back to "{prefix} {len + 1}". The name
    /// is fixed here and never renumbered when other shapes go away.
    pub fn add(&mut self, geometry: Geometry, suggested_name: Option<&str>) -> &NamedShape {
        let name = match suggested_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{} {}", self.name_prefix, self.shapes.len() + 1),
        };

        let id = ShapeId(self.next_id);
        self.next_id += 1;
        debug!("adding {} {:?} as {}", geometry.kind(), name, id);

        self.shapes
            .entry(id)
            .or_insert(NamedShape::new(id, name, geometry))
    }

    /// Remove a shape; absent ids are ignored
    pub fn remove(&mut self, id: ShapeId) -> Option<NamedShape> {
        let removed = self.shapes.remove(&id);
        if let Some(shape) = &removed {
            debug!("removed {:?} ({})", shape.name, id);
        }
        removed
    }

    /// Swap in edited geometry, keeping id and name
    pub fn replace_geometry(
        &mut self,
        id: ShapeId,
        geometry: Geometry,
    ) -> Result<(), CollectionError> {
        let shape = self
            .shapes
            .get_mut(&id)
            .ok_or(CollectionError::NotFound(id))?;
        shape.geometry = geometry;
        Ok(())
    }

    pub fn rename(&mut self, id: ShapeId, name: &str) -> Result<(), CollectionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CollectionError::EmptyName);
        }
        let shape = self.shapes.get_mut(&id).ok_or(CollectionError::NotFound(id))?;
        shape.name = name.to_string();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn get(&self, id: ShapeId) -> Option<&NamedShape> {
        self.shapes.get(&id)
    }

    /// First shape with exactly this name, in display order
    pub fn find_by_name(&self, name: &str) -> Option<&NamedShape> {
        self.iter().find(|shape| shape.name == name)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in insertion order. The iterator is lazy and can be cloned to
    /// restart from the beginning.
    pub fn iter(&self) -> impl Iterator<Item = &NamedShape> + Clone {
        self.shapes.values()
    }

    pub fn list(&self) -> impl Iterator<Item = &NamedShape> + Clone {
        self.iter()
    }

    /// Sum of every member's area in km², rounded to 3 decimals for display.
    /// Recomputed on each call.
    pub fn total_area_km2(&self) -> f64 {
        round_km2(self.iter().map(NamedShape::area_km2).sum())
    }

    /// Box around every outer ring, `None` for an empty collection
    pub fn bounds(&self) -> Option<Bounds> {
        self.iter()
            .flat_map(|shape| shape.geometry.outer_rings())
            .filter_map(|ring| Bounds::from_points(ring.coords()))
            .reduce(|mut acc, next| {
                acc.union(&next);
                acc
            })
    }
}

/// Round an area to the 3 decimals used on screen
pub fn round_km2(area: f64) -> f64 {
    (area * 1000.0).round() / 1000.0
}

impl<'a> IntoIterator for &'a ShapeCollection {
    type Item = &'a NamedShape;
    type IntoIter = std::collections::btree_map::Values<'a, ShapeId, NamedShape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Polygon;
    use crate::geometry::area_km2;

    fn cell(lon: f64, lat: f64) -> Geometry {
        Geometry::Polygon(Polygon::from_lon_lat(&[
            (lon, lat),
            (lon + 1.0, lat),
            (lon + 1.0, lat + 1.0),
            (lon, lat + 1.0),
        ]))
    }

    fn names(collection: &ShapeCollection) -> Vec<String> {
        collection.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_auto_names_survive_deletion() {
        let mut collection = ShapeCollection::new();
        let first = collection.add(cell(0.0, 0.0), None).id;
        collection.add(cell(2.0, 0.0), None);
        collection.add(cell(4.0, 0.0), Some("   "));

        assert_eq!(names(&collection), ["Polígono 1", "Polígono 2", "Polígono 3"]);

        collection.remove(first);
        assert_eq!(names(&collection), ["Polígono 2", "Polígono 3"]);
    }

    #[test]
    fn test_suggested_name_is_used() {
        let mut collection = ShapeCollection::new();
        let shape = collection.add(cell(0.0, 0.0), Some(" Fazenda Norte "));
        assert_eq!(shape.name, "Fazenda Norte");
    }

    #[test]
    fn test_custom_prefix() {
        let mut collection = ShapeCollection::with_name_prefix("Plot");
        assert_eq!(collection.add(cell(0.0, 0.0), None).name, "Plot 1");
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut collection = ShapeCollection::new();
        collection.add(cell(0.0, 0.0), None);

        assert!(collection.remove(ShapeId(42)).is_none());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_replace_geometry() {
        let mut collection = ShapeCollection::new();
        let id = collection.add(cell(0.0, 0.0), Some("edited")).id;

        collection.replace_geometry(id, cell(10.0, 40.0)).unwrap();
        let shape = collection.get(id).unwrap();
        assert_eq!(shape.name, "edited");
        assert_eq!(shape.geometry, cell(10.0, 40.0));

        assert_eq!(
            collection.replace_geometry(ShapeId(99), cell(0.0, 0.0)),
            Err(CollectionError::NotFound(ShapeId(99)))
        );
    }

    #[test]
    fn test_rename() {
        let mut collection = ShapeCollection::new();
        let id = collection.add(cell(0.0, 0.0), None).id;

        collection.rename(id, "Pasto").unwrap();
        assert_eq!(collection.get(id).unwrap().name, "Pasto");
        assert_eq!(collection.rename(id, " "), Err(CollectionError::EmptyName));
        assert_eq!(
            collection.rename(ShapeId(7), "x"),
            Err(CollectionError::NotFound(ShapeId(7)))
        );
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut collection = ShapeCollection::new();
        let before = collection.add(cell(0.0, 0.0), None).id;
        collection.clear();
        assert!(collection.is_empty());

        let after = collection.add(cell(0.0, 0.0), None);
        assert!(after.id > before);
        assert_eq!(after.name, "Polígono 1");
    }

    #[test]
    fn test_total_area_tracks_mutations() {
        let mut collection = ShapeCollection::new();
        assert_eq!(collection.total_area_km2(), 0.0);

        let a = collection.add(cell(0.0, 0.0), None).id;
        let b = collection.add(cell(30.0, 45.0), None).id;
        collection.add(cell(-60.0, -20.0), None);
        collection.replace_geometry(b, cell(10.0, 10.0)).unwrap();
        collection.remove(a);

        let expected: f64 = collection.iter().map(|s| area_km2(&s.geometry)).sum();
        assert_eq!(collection.total_area_km2(), round_km2(expected));
        assert!((collection.total_area_km2() - expected).abs() <= 0.0005);
    }

    #[test]
    fn test_list_is_restartable() {
        let mut collection = ShapeCollection::new();
        collection.add(cell(0.0, 0.0), Some("a"));
        collection.add(cell(1.0, 0.0), Some("b"));

        let list = collection.list();
        assert_eq!(list.clone().count(), 2);
        let names: Vec<_> = list.map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_bounds_cover_all_shapes() {
        let mut collection = ShapeCollection::new();
        assert!(collection.bounds().is_none());

        collection.add(cell(0.0, 0.0), None);
        collection.add(cell(10.0, -5.0), None);

        let bounds = collection.bounds().unwrap();
        assert_eq!(bounds.min_lon, 0.0);
        assert_eq!(bounds.max_lon, 11.0);
        assert_eq!(bounds.min_lat, -5.0);
        assert_eq!(bounds.max_lat, 1.0);
    }

    #[test]
    fn test_find_by_name() {
        let mut collection = ShapeCollection::new();
        collection.add(cell(0.0, 0.0), Some("Reserva"));
        assert!(collection.find_by_name("Reserva").is_some());
        assert!(collection.find_by_name("Outro").is_none());
    }
}
