//! Shared geometry primitives: points, edges between points, polygon faces
//! and surfaces. Link and surface shapes are assembled from these tables.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;

#[derive(Debug, Clone)]
pub struct Point {
    pub id: i64,
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Planar distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Default)]
pub struct PointTable {
    points: Vec<Point>,
    by_id: FxHashMap<i64, usize>,
}

impl PointTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["ID", "XCOORD", "YCOORD"])?;
        let mut table = PointTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let point = Point {
                id: f.require_int("ID")?,
                x: f.require_float("XCOORD")?,
                y: f.require_float("YCOORD")?,
            };
            table.by_id.entry(point.id).or_insert(table.points.len());
            table.points.push(point);
        }
        Ok(table)
    }

    pub fn get(&self, id: i64) -> Option<&Point> {
        self.by_id.get(&id).map(|&i| &self.points[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// An edge between two shared points. Interior shape comes from `$EDGEITEM`.
#[derive(Debug, Clone)]
pub struct EdgePrimitive {
    pub id: i64,
    pub from_point: i64,
    pub to_point: i64,
}

#[derive(Debug, Default)]
pub struct EdgePrimitiveTable {
    edges: Vec<EdgePrimitive>,
    by_id: FxHashMap<i64, usize>,
}

impl EdgePrimitiveTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["ID", "FROMPOINTID", "TOPOINTID"])?;
        let mut table = EdgePrimitiveTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let edge = EdgePrimitive {
                id: f.require_int("ID")?,
                from_point: f.require_int("FROMPOINTID")?,
                to_point: f.require_int("TOPOINTID")?,
            };
            table.by_id.entry(edge.id).or_insert(table.edges.len());
            table.edges.push(edge);
        }
        Ok(table)
    }

    pub fn get(&self, id: i64) -> Option<&EdgePrimitive> {
        self.by_id.get(&id).map(|&i| &self.edges[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgePrimitive> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Interior vertex of an edge primitive.
#[derive(Debug, Clone)]
pub struct EdgeItem {
    pub edge_id: i64,
    pub index: i64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Default)]
pub struct EdgeItemTable {
    items: Vec<EdgeItem>,
    by_edge: FxHashMap<i64, Vec<usize>>,
}

impl EdgeItemTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["EDGEID", "INDEX", "XCOORD", "YCOORD"])?;
        let mut table = EdgeItemTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let item = EdgeItem {
                edge_id: f.require_int("EDGEID")?,
                index: f.require_int("INDEX")?,
                x: f.require_float("XCOORD")?,
                y: f.require_float("YCOORD")?,
            };
            table
                .by_edge
                .entry(item.edge_id)
                .or_default()
                .push(table.items.len());
            table.items.push(item);
        }
        Ok(table)
    }

    /// Items for one edge, sorted by index. Ties keep file order.
    pub fn items_for(&self, edge_id: i64) -> Vec<&EdgeItem> {
        let mut items: Vec<&EdgeItem> = match self.by_edge.get(&edge_id) {
            Some(indices) => indices.iter().map(|&i| &self.items[i]).collect(),
            None => Vec::new(),
        };
        items.sort_by_key(|item| item.index);
        items
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Face {
    pub id: i64,
}

#[derive(Debug, Default)]
pub struct FaceTable {
    faces: Vec<Face>,
    by_id: FxHashMap<i64, usize>,
}

impl FaceTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["ID"])?;
        let mut table = FaceTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let face = Face {
                id: f.require_int("ID")?,
            };
            table.by_id.entry(face.id).or_insert(table.faces.len());
            table.faces.push(face);
        }
        Ok(table)
    }

    pub fn get(&self, id: i64) -> Option<&Face> {
        self.by_id.get(&id).map(|&i| &self.faces[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// One edge of a face ring. `reversed` flips the edge direction when the
/// ring is traced.
#[derive(Debug, Clone)]
pub struct FaceItem {
    pub face_id: i64,
    pub index: i64,
    pub edge_id: i64,
    pub reversed: bool,
}

#[derive(Debug, Default)]
pub struct FaceItemTable {
    items: Vec<FaceItem>,
    by_face: FxHashMap<i64, Vec<usize>>,
}

impl FaceItemTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["FACEID", "INDEX", "EDGEID"])?;
        let mut table = FaceItemTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let item = FaceItem {
                face_id: f.require_int("FACEID")?,
                index: f.require_int("INDEX")?,
                edge_id: f.require_int("EDGEID")?,
                reversed: f.flag("DIRECTION")?,
            };
            table
                .by_face
                .entry(item.face_id)
                .or_default()
                .push(table.items.len());
            table.items.push(item);
        }
        Ok(table)
    }

    /// Items for one face, sorted by ring index.
    pub fn items_for(&self, face_id: i64) -> Vec<&FaceItem> {
        let mut items: Vec<&FaceItem> = match self.by_face.get(&face_id) {
            Some(indices) => indices.iter().map(|&i| &self.items[i]).collect(),
            None => Vec::new(),
        };
        items.sort_by_key(|item| item.index);
        items
    }

    pub fn iter(&self) -> impl Iterator<Item = &FaceItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Surface {
    pub id: i64,
}

#[derive(Debug, Default)]
pub struct SurfaceTable {
    surfaces: Vec<Surface>,
    by_id: FxHashMap<i64, usize>,
}

impl SurfaceTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["ID"])?;
        let mut table = SurfaceTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let surface = Surface {
                id: f.require_int("ID")?,
            };
            table
                .by_id
                .entry(surface.id)
                .or_insert(table.surfaces.len());
            table.surfaces.push(surface);
        }
        Ok(table)
    }

    pub fn get(&self, id: i64) -> Option<&Surface> {
        self.by_id.get(&id).map(|&i| &self.surfaces[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

/// Face membership of a surface. Enclave faces are holes.
#[derive(Debug, Clone)]
pub struct SurfaceItem {
    pub surface_id: i64,
    pub face_id: i64,
    pub enclave: bool,
}

#[derive(Debug, Default)]
pub struct SurfaceItemTable {
    items: Vec<SurfaceItem>,
    by_surface: FxHashMap<i64, Vec<usize>>,
}

impl SurfaceItemTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["SURFACEID", "FACEID"])?;
        let mut table = SurfaceItemTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let item = SurfaceItem {
                surface_id: f.require_int("SURFACEID")?,
                face_id: f.require_int("FACEID")?,
                enclave: f.flag("ENCLAVE")?,
            };
            table
                .by_surface
                .entry(item.surface_id)
                .or_default()
                .push(table.items.len());
            table.items.push(item);
        }
        Ok(table)
    }

    /// Faces of one surface in file order.
    pub fn items_for_surface(&self, surface_id: i64) -> Vec<&SurfaceItem> {
        match self.by_surface.get(&surface_id) {
            Some(indices) => indices.iter().map(|&i| &self.items[i]).collect(),
            None => Vec::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurfaceItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
