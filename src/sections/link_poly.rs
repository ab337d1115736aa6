//! `$LINKPOLY` table: detailed link geometry keyed by (from, to) node pair.
//!
//! Exports write the points index-ascending, so lookups return them in
//! stored order.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;

#[derive(Debug, Clone)]
pub struct LinkPolyPoint {
    pub from_node: i64,
    pub to_node: i64,
    pub index: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Default)]
pub struct LinkPolyTable {
    points: Vec<LinkPolyPoint>,
    by_pair: FxHashMap<(i64, i64), Vec<usize>>,
}

impl LinkPolyTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["FROMNODENO", "TONODENO", "XCOORD", "YCOORD"])?;
        let mut table = LinkPolyTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let point = LinkPolyPoint {
                from_node: f.require_int("FROMNODENO")?,
                to_node: f.require_int("TONODENO")?,
                index: f.int("INDEX")?,
                x: f.require_float("XCOORD")?,
                y: f.require_float("YCOORD")?,
                z: f.float("ZCOORD")?,
            };
            table
                .by_pair
                .entry((point.from_node, point.to_node))
                .or_default()
                .push(table.points.len());
            table.points.push(point);
        }
        Ok(table)
    }

    /// Points of one directed link in stored order.
    pub fn points_for(&self, from: i64, to: i64) -> Vec<&LinkPolyPoint> {
        match self.by_pair.get(&(from, to)) {
            Some(indices) => indices.iter().map(|&i| &self.points[i]).collect(),
            None => Vec::new(),
        }
    }

    pub fn has_points(&self, from: i64, to: i64) -> bool {
        self.by_pair.contains_key(&(from, to))
    }

    /// 3D length of one directed link polygon, elevation included.
    /// Zero when fewer than two points exist.
    pub fn length_3d(&self, from: i64, to: i64) -> f64 {
        let points = self.points_for(from, to);
        if points.len() < 2 {
            return 0.0;
        }
        let mut length = 0.0;
        for pair in points.windows(2) {
            let dx = pair[1].x - pair[0].x;
            let dy = pair[1].y - pair[0].y;
            let dz = pair[1].z - pair[0].z;
            length += (dx * dx + dy * dy + dz * dz).sqrt();
        }
        length
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkPolyPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
