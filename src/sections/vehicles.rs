//! `$VEHUNIT`, `$VEHCOMB` and `$VEHUNITTOVEHCOMB` sections.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;
use crate::sections::link_type::split_tsys_set;

#[derive(Debug, Clone)]
pub struct VehicleUnit {
    pub no: i64,
    pub code: String,
    pub name: String,
    pub tsys_set: Vec<String>,
    pub powered: bool,
    pub seat_cap: i64,
    pub total_cap: i64,
    pub cost_rate_hour_service: f64,
    pub cost_rate_hour_empty: f64,
    pub cost_rate_km_service: f64,
    pub cost_rate_km_empty: f64,
}

#[derive(Debug, Default)]
pub struct VehicleUnitTable {
    units: Vec<VehicleUnit>,
    by_no: FxHashMap<i64, usize>,
}

impl VehicleUnitTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["NO"])?;
        let mut table = VehicleUnitTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let unit = VehicleUnit {
                no: f.require_int("NO")?,
                code: f.text("CODE"),
                name: f.text("NAME"),
                tsys_set: split_tsys_set(f.raw("TSYSSET")),
                powered: f.flag("POWERED")?,
                seat_cap: f.int("SEATCAP")?,
                total_cap: f.int("TOTALCAP")?,
                cost_rate_hour_service: f.float("COSTRATEHOURSERVICE")?,
                cost_rate_hour_empty: f.float("COSTRATEHOUREMPTY")?,
                cost_rate_km_service: f.float("COSTRATEKMSERVICE")?,
                cost_rate_km_empty: f.float("COSTRATEKMEMPTY")?,
            };
            table.by_no.entry(unit.no).or_insert(table.units.len());
            table.units.push(unit);
        }
        Ok(table)
    }

    pub fn get(&self, no: i64) -> Option<&VehicleUnit> {
        self.by_no.get(&no).map(|&i| &self.units[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleUnit> {
        self.units.iter()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct VehicleCombination {
    pub no: i64,
    pub code: String,
    pub name: String,
    pub cost_rate_hour_service: f64,
    pub cost_rate_hour_empty: f64,
    pub cost_rate_km_service: f64,
    pub cost_rate_km_empty: f64,
}

#[derive(Debug, Default)]
pub struct VehicleCombinationTable {
    combinations: Vec<VehicleCombination>,
    by_no: FxHashMap<i64, usize>,
}

impl VehicleCombinationTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["NO"])?;
        let mut table = VehicleCombinationTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let comb = VehicleCombination {
                no: f.require_int("NO")?,
                code: f.text("CODE"),
                name: f.text("NAME"),
                cost_rate_hour_service: f.float("COSTRATEHOURSERVICE")?,
                cost_rate_hour_empty: f.float("COSTRATEHOUREMPTY")?,
                cost_rate_km_service: f.float("COSTRATEKMSERVICE")?,
                cost_rate_km_empty: f.float("COSTRATEKMEMPTY")?,
            };
            table
                .by_no
                .entry(comb.no)
                .or_insert(table.combinations.len());
            table.combinations.push(comb);
        }
        Ok(table)
    }

    pub fn get(&self, no: i64) -> Option<&VehicleCombination> {
        self.by_no.get(&no).map(|&i| &self.combinations[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleCombination> {
        self.combinations.iter()
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
}

/// Membership row: how many units of one type a combination contains.
#[derive(Debug, Clone)]
pub struct VehicleUnitToCombination {
    pub comb_no: i64,
    pub unit_no: i64,
    pub num_units: i64,
}

#[derive(Debug, Default)]
pub struct VehicleUnitToCombinationTable {
    mappings: Vec<VehicleUnitToCombination>,
}

impl VehicleUnitToCombinationTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["VEHCOMBNO", "VEHUNITNO"])?;
        let mut mappings = Vec::with_capacity(raw.rows.len());
        for row in &raw.rows {
            let f = columns.row(row);
            mappings.push(VehicleUnitToCombination {
                comb_no: f.require_int("VEHCOMBNO")?,
                unit_no: f.require_int("VEHUNITNO")?,
                num_units: f.int("NUMVEHUNITS")?,
            });
        }
        Ok(VehicleUnitToCombinationTable { mappings })
    }

    /// Unit memberships of one combination.
    pub fn units_for(&self, comb_no: i64) -> Vec<&VehicleUnitToCombination> {
        self.mappings
            .iter()
            .filter(|m| m.comb_no == comb_no)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleUnitToCombination> {
        self.mappings.iter()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_sections;
    use std::io::Cursor;

    #[test]
    fn test_vehicle_tables() {
        let input = "\
$VEHUNIT:NO;CODE;NAME;TSYSSET;POWERED;SEATCAP;TOTALCAP
1;BUS12;Standard bus;B;1;40;80
$VEHCOMB:NO;CODE;NAME
10;BUS;Single bus
$VEHUNITTOVEHCOMB:VEHCOMBNO;VEHUNITNO;NUMVEHUNITS
10;1;1
";
        let sections = read_sections(Cursor::new(input)).unwrap();
        let units = VehicleUnitTable::parse(&sections[0]).unwrap();
        let combs = VehicleCombinationTable::parse(&sections[1]).unwrap();
        let mappings = VehicleUnitToCombinationTable::parse(&sections[2]).unwrap();

        let unit = units.get(1).unwrap();
        assert!(unit.powered);
        assert_eq!(unit.tsys_set, vec!["B"]);
        assert_eq!(unit.total_cap, 80);
        assert_eq!(combs.get(10).unwrap().code, "BUS");

        let members = mappings.units_for(10);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].unit_no, 1);
    }
}
