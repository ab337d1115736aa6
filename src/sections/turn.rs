//! `$TURN` table: turning movements through intersection nodes.

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;
use crate::sections::link_type::split_tsys_set;

/// Turn type numbers follow the export convention: 1 = left, 2 = right,
/// 3 = through, 4 = U-turn.
#[derive(Debug, Clone)]
pub struct Turn {
    pub from_node: i64,
    pub via_node: i64,
    pub to_node: i64,
    pub type_no: i64,
    pub tsys_set: Vec<String>,
    pub cap_prt: i64,
    /// Turn penalty as written, e.g. `5s`.
    pub t0_prt: String,
    pub add_vals: [i64; 3],
    pub is_change_of_direction: bool,
}

impl Turn {
    pub fn allows_system(&self, tsys: &str) -> bool {
        self.tsys_set.iter().any(|s| s == tsys)
    }
}

#[derive(Debug, Default)]
pub struct TurnTable {
    turns: Vec<Turn>,
}

impl TurnTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["FROMNODENO", "VIANODENO", "TONODENO"])?;
        let mut turns = Vec::with_capacity(raw.rows.len());
        for row in &raw.rows {
            let f = columns.row(row);
            turns.push(Turn {
                from_node: f.require_int("FROMNODENO")?,
                via_node: f.require_int("VIANODENO")?,
                to_node: f.require_int("TONODENO")?,
                type_no: f.int("TYPENO")?,
                tsys_set: split_tsys_set(f.raw("TSYSSET")),
                cap_prt: f.int("CAPPRT")?,
                t0_prt: f.text("T0PRT"),
                add_vals: [f.int("ADDVAL1")?, f.int("ADDVAL2")?, f.int("ADDVAL3")?],
                is_change_of_direction: f.flag("ISCHANGEOFDIRECTION")?,
            });
        }
        Ok(TurnTable { turns })
    }

    /// One exact movement, or `None`.
    pub fn get(&self, from: i64, via: i64, to: i64) -> Option<&Turn> {
        self.turns
            .iter()
            .find(|t| t.from_node == from && t.via_node == via && t.to_node == to)
    }

    /// All movements through one intersection node.
    pub fn via(&self, node: i64) -> Vec<&Turn> {
        self.turns.iter().filter(|t| t.via_node == node).collect()
    }

    pub fn of_type(&self, type_no: i64) -> Vec<&Turn> {
        self.turns.iter().filter(|t| t.type_no == type_no).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_sections;
    use std::io::Cursor;

    const TURNS: &str = "$TURN:FROMNODENO;VIANODENO;TONODENO;TYPENO;TSYSSET;CAPPRT;T0PRT\n\
        1;2;3;3;C,H;100000;0s\n\
        3;2;1;3;C;100000;0s\n\
        1;2;5;1;C;80000;5s\n";

    #[test]
    fn test_parse_turns() {
        let sections = read_sections(Cursor::new(TURNS)).unwrap();
        let table = TurnTable::parse(&sections[0]).unwrap();
        assert_eq!(table.len(), 3);
        let turn = table.get(1, 2, 5).unwrap();
        assert_eq!(turn.type_no, 1);
        assert_eq!(turn.t0_prt, "5s");
        assert!(table.get(5, 2, 1).is_none());
    }

    #[test]
    fn test_via_and_type_filters() {
        let sections = read_sections(Cursor::new(TURNS)).unwrap();
        let table = TurnTable::parse(&sections[0]).unwrap();
        assert_eq!(table.via(2).len(), 3);
        assert!(table.via(9).is_empty());
        assert_eq!(table.of_type(3).len(), 2);
        assert!(table.get(1, 2, 3).unwrap().allows_system("H"));
        assert!(!table.get(3, 2, 1).unwrap().allows_system("H"));
    }
}
