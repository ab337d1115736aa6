//! `$TSYS`, `$MODE` and `$DEMANDSEGMENT` sections.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;
use crate::sections::link_type::split_tsys_set;

/// A transport system ("C" car, "B" bus, ...), the unit links and turns
/// reference in their TSYSSET fields.
#[derive(Debug, Clone)]
pub struct TransportSystem {
    pub code: String,
    pub name: String,
    pub sys_type: String,
    pub pcu: f64,
}

#[derive(Debug, Default)]
pub struct TransportSystemTable {
    systems: Vec<TransportSystem>,
    by_code: FxHashMap<String, usize>,
}

impl TransportSystemTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["CODE"])?;
        let mut table = TransportSystemTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let system = TransportSystem {
                code: f.require_text("CODE")?,
                name: f.text("NAME"),
                sys_type: f.text("TYPE"),
                pcu: f.float("PCU")?,
            };
            table
                .by_code
                .entry(system.code.clone())
                .or_insert(table.systems.len());
            table.systems.push(system);
        }
        Ok(table)
    }

    pub fn get(&self, code: &str) -> Option<&TransportSystem> {
        self.by_code.get(code).map(|&i| &self.systems[i])
    }

    pub fn of_type<'a>(&'a self, sys_type: &'a str) -> impl Iterator<Item = &'a TransportSystem> {
        self.systems.iter().filter(move |s| s.sys_type == sys_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransportSystem> {
        self.systems.iter()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

/// A mode groups the transport systems a demand segment may use.
#[derive(Debug, Clone)]
pub struct Mode {
    pub code: String,
    pub name: String,
    pub tsys_set: Vec<String>,
    pub interchangeable: bool,
}

#[derive(Debug, Default)]
pub struct ModeTable {
    modes: Vec<Mode>,
    by_code: FxHashMap<String, usize>,
}

impl ModeTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["CODE"])?;
        let mut table = ModeTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let mode = Mode {
                code: f.require_text("CODE")?,
                name: f.text("NAME"),
                tsys_set: split_tsys_set(f.raw("TSYSSET")),
                interchangeable: f.flag("INTERCHANGEABLE")?,
            };
            table
                .by_code
                .entry(mode.code.clone())
                .or_insert(table.modes.len());
            table.modes.push(mode);
        }
        Ok(table)
    }

    pub fn get(&self, code: &str) -> Option<&Mode> {
        self.by_code.get(code).map(|&i| &self.modes[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mode> {
        self.modes.iter()
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct DemandSegment {
    pub code: String,
    pub name: String,
    pub mode: String,
    pub occupancy_rate: f64,
    pub prfac_ap: f64,
    pub prfac_ah: f64,
}

#[derive(Debug, Default)]
pub struct DemandSegmentTable {
    segments: Vec<DemandSegment>,
}

impl DemandSegmentTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["CODE"])?;
        let mut segments = Vec::with_capacity(raw.rows.len());
        for row in &raw.rows {
            let f = columns.row(row);
            segments.push(DemandSegment {
                code: f.require_text("CODE")?,
                name: f.text("NAME"),
                mode: f.text("MODE"),
                occupancy_rate: f.float("OCCUPANCYRATE")?,
                prfac_ap: f.float("PRFACAP")?,
                prfac_ah: f.float("PRFACAH")?,
            });
        }
        Ok(DemandSegmentTable { segments })
    }

    pub fn for_mode<'a>(&'a self, mode: &'a str) -> impl Iterator<Item = &'a DemandSegment> {
        self.segments.iter().filter(move |s| s.mode == mode)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DemandSegment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_sections;
    use std::io::Cursor;

    #[test]
    fn test_mode_splits_tsys_set() {
        let input = "$MODE:CODE;NAME;TSYSSET;INTERCHANGEABLE\nPuT;Public;B,U,T;1\nPrT;Private;C;0\n";
        let sections = read_sections(Cursor::new(input)).unwrap();
        let modes = ModeTable::parse(&sections[0]).unwrap();
        let put = modes.get("PuT").unwrap();
        assert_eq!(put.tsys_set, vec!["B", "U", "T"]);
        assert!(put.interchangeable);
        assert!(!modes.get("PrT").unwrap().interchangeable);
    }

    #[test]
    fn test_tsys_filter_by_type() {
        let input = "$TSYS:CODE;NAME;TYPE;PCU\nC;Car;PrT;1\nB;Bus;PuT;3\nU;Metro;PuT;0\n";
        let sections = read_sections(Cursor::new(input)).unwrap();
        let systems = TransportSystemTable::parse(&sections[0]).unwrap();
        assert_eq!(systems.len(), 3);
        assert_eq!(systems.of_type("PuT").count(), 2);
        assert_eq!(systems.get("C").unwrap().pcu, 1.0);
    }
}
