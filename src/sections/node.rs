//! `$NODE` table. Nodes anchor links and carry the coordinates the road
//! graph is built from.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;

#[derive(Debug, Clone)]
pub struct Node {
    pub no: i64,
    pub code: String,
    pub name: String,
    pub type_no: i64,
    pub control_type: i64,
    pub main_node_no: i64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub add_val1: i64,
    pub add_val2: i64,
    pub add_val3: i64,
    /// Junction delay as written, unit suffix and all.
    pub t0_prt: String,
    pub cap_prt: i64,
}

#[derive(Debug, Default)]
pub struct NodeTable {
    nodes: Vec<Node>,
    by_no: FxHashMap<i64, usize>,
}

impl NodeTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["NO", "XCOORD", "YCOORD"])?;
        let mut table = NodeTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let node = Node {
                no: f.require_int("NO")?,
                code: f.text("CODE"),
                name: f.text("NAME"),
                type_no: f.int("TYPENO")?,
                control_type: f.int("CONTROLTYPE")?,
                main_node_no: f.int("MAINNODENO")?,
                x: f.require_float("XCOORD")?,
                y: f.require_float("YCOORD")?,
                z: f.float("ZCOORD")?,
                add_val1: f.int("ADDVAL1")?,
                add_val2: f.int("ADDVAL2")?,
                add_val3: f.int("ADDVAL3")?,
                t0_prt: f.text("T0PRT"),
                cap_prt: f.int("CAPPRT")?,
            };
            table.by_no.entry(node.no).or_insert(table.nodes.len());
            table.nodes.push(node);
        }
        Ok(table)
    }

    pub fn get(&self, no: i64) -> Option<&Node> {
        self.by_no.get(&no).map(|&i| &self.nodes[i])
    }

    pub fn of_type(&self, type_no: i64) -> Vec<&Node> {
        self.nodes.iter().filter(|n| n.type_no == type_no).collect()
    }

    /// (min_x, min_y, max_x, max_y) over all nodes, or `None` when empty.
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.nodes.first()?;
        let mut bbox = (first.x, first.y, first.x, first.y);
        for node in &self.nodes[1..] {
            bbox.0 = bbox.0.min(node.x);
            bbox.1 = bbox.1.min(node.y);
            bbox.2 = bbox.2.max(node.x);
            bbox.3 = bbox.3.max(node.y);
        }
        Some(bbox)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
