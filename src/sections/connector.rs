//! `$CONNECTOR` table: zone to network attachment points.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;
use crate::sections::link_type::split_tsys_set;
use crate::units;

#[derive(Debug, Clone)]
pub struct Connector {
    pub zone_no: i64,
    pub node_no: i64,
    /// `O` for origin connectors, `D` for destination connectors.
    pub direction: String,
    pub type_no: i64,
    pub tsys_set: Vec<String>,
    /// Length as written, e.g. `0.903km`.
    pub length: String,
    /// Access times per transport system from `T0_TSYS(...)` columns.
    pub t0_by_system: FxHashMap<String, String>,
    pub weight_prt: f64,
    pub weight_put: f64,
    pub add_vals: [i64; 3],
}

impl Connector {
    pub fn is_origin(&self) -> bool {
        self.direction == "O"
    }

    pub fn is_destination(&self) -> bool {
        self.direction == "D"
    }

    /// Length in meters, parsed from the raw string.
    pub fn length_m(&self) -> Result<f64> {
        units::parse_length(&self.length)
    }
}

#[derive(Debug, Default)]
pub struct ConnectorTable {
    connectors: Vec<Connector>,
}

impl ConnectorTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["ZONENO", "NODENO"])?;
        let mut connectors = Vec::with_capacity(raw.rows.len());
        for row in &raw.rows {
            let f = columns.row(row);
            let t0_by_system = f
                .system_values("T0_TSYS(")
                .into_iter()
                .map(|(sys, value)| (sys, value.to_string()))
                .collect();
            connectors.push(Connector {
                zone_no: f.require_int("ZONENO")?,
                node_no: f.require_int("NODENO")?,
                direction: f.text("DIRECTION"),
                type_no: f.int("TYPENO")?,
                tsys_set: split_tsys_set(f.raw("TSYSSET")),
                length: f.text("LENGTH"),
                t0_by_system,
                weight_prt: f.float("WEIGHT(PRT)")?,
                weight_put: f.float("WEIGHT(PUT)")?,
                add_vals: [f.int("ADDVAL1")?, f.int("ADDVAL2")?, f.int("ADDVAL3")?],
            });
        }
        Ok(ConnectorTable { connectors })
    }

    pub fn for_zone(&self, zone_no: i64) -> Vec<&Connector> {
        self.connectors
            .iter()
            .filter(|c| c.zone_no == zone_no)
            .collect()
    }

    pub fn for_node(&self, node_no: i64) -> Vec<&Connector> {
        self.connectors
            .iter()
            .filter(|c| c.node_no == node_no)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.iter()
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_sections;
    use std::io::Cursor;

    const CONNECTORS: &str = "$CONNECTOR:ZONENO;NODENO;DIRECTION;TYPENO;TSYSSET;LENGTH;T0_TSYS(W);WEIGHT(PRT);WEIGHT(PUT)\n\
        100;1;O;1;C,W;0.903km;11min;50;50\n\
        100;1;D;1;C,W;0.903km;11min;50;50\n\
        200;3;O;1;C;1.2km;;100;0\n";

    fn parse(input: &str) -> ConnectorTable {
        let sections = read_sections(Cursor::new(input)).unwrap();
        ConnectorTable::parse(&sections[0]).unwrap()
    }

    #[test]
    fn test_parse_connectors() {
        let table = parse(CONNECTORS);
        assert_eq!(table.len(), 3);
        let first = &table.for_zone(100)[0];
        assert!(first.is_origin());
        assert!(!first.is_destination());
        assert_eq!(first.weight_prt, 50.0);
        assert_eq!(first.t0_by_system.get("W").unwrap(), "11min");
        assert!((first.length_m().unwrap() - 903.0).abs() < 1e-9);
    }

    #[test]
    fn test_zone_and_node_filters() {
        let table = parse(CONNECTORS);
        assert_eq!(table.for_zone(100).len(), 2);
        assert_eq!(table.for_zone(200).len(), 1);
        assert_eq!(table.for_node(1).len(), 2);
        assert!(table.for_node(9).is_empty());
    }
}
