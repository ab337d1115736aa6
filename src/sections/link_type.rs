//! `$LINKTYPE` table. Link types carry the defaults and speed limits that
//! apply to links of that type.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;

#[derive(Debug, Clone)]
pub struct LinkType {
    pub no: i64,
    pub group_type: String,
    pub name: String,
    pub strict: bool,
    pub rank: i64,
    pub tsys_set: Vec<String>,
    pub num_lanes: i64,
    pub cap_prt: i64,
    /// Default speed as written, e.g. `50km/h`.
    pub v0_prt: String,
    pub v_min_prt: String,
    /// Per-system speed limits from `VMAX_PRTSYS(...)` columns, raw values.
    pub vmax_by_system: FxHashMap<String, String>,
}

#[derive(Debug, Default)]
pub struct LinkTypeTable {
    types: Vec<LinkType>,
    by_no: FxHashMap<i64, usize>,
}

impl LinkTypeTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["NO"])?;
        let mut table = LinkTypeTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let vmax_by_system = f
                .system_values("VMAX_PRTSYS(")
                .into_iter()
                .map(|(sys, value)| (sys, value.to_string()))
                .collect();
            let link_type = LinkType {
                no: f.require_int("NO")?,
                group_type: f.text("GTYPE"),
                name: f.text("NAME"),
                strict: f.flag("STRICT")?,
                rank: f.int("RANK")?,
                tsys_set: split_tsys_set(f.raw("TSYSSET")),
                num_lanes: f.int("NUMLANES")?,
                cap_prt: f.int("CAPPRT")?,
                v0_prt: f.text("V0PRT"),
                v_min_prt: f.text("VMINPRT"),
                vmax_by_system,
            };
            table.by_no.entry(link_type.no).or_insert(table.types.len());
            table.types.push(link_type);
        }
        Ok(table)
    }

    pub fn get(&self, no: i64) -> Option<&LinkType> {
        self.by_no.get(&no).map(|&i| &self.types[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// `TSYSSET` is a comma separated list of transport system codes.
pub(crate) fn split_tsys_set(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_sections;
    use std::io::Cursor;

    #[test]
    fn test_parse_link_types() {
        let input = "$LINKTYPE:NO;GTYPE;NAME;RANK;TSYSSET;NUMLANES;CAPPRT;V0PRT;VMAX_PRTSYS(C);VMAX_PRTSYS(H)\n\
            1;A;Motorway;1;C,H;2;2000;120km/h;130km/h;80km/h\n\
            20;B;Residential;5;C,H,W;1;600;30km/h;;\n";
        let sections = read_sections(Cursor::new(input)).unwrap();
        let table = LinkTypeTable::parse(&sections[0]).unwrap();
        assert_eq!(table.len(), 2);

        let motorway = table.get(1).unwrap();
        assert_eq!(motorway.tsys_set, vec!["C", "H"]);
        assert_eq!(motorway.v0_prt, "120km/h");
        assert_eq!(motorway.vmax_by_system.get("C").unwrap(), "130km/h");
        assert_eq!(motorway.vmax_by_system.get("H").unwrap(), "80km/h");

        // Empty per-system values are not recorded.
        let residential = table.get(20).unwrap();
        assert!(residential.vmax_by_system.is_empty());
        assert_eq!(residential.tsys_set.len(), 3);
    }

    #[test]
    fn test_split_tsys_set() {
        assert_eq!(split_tsys_set("C,H,W"), vec!["C", "H", "W"]);
        assert_eq!(split_tsys_set(" C , H "), vec!["C", "H"]);
        assert!(split_tsys_set("").is_empty());
    }
}
