//! `$ZONE` table with the demographic columns demand models read.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;

#[derive(Debug, Clone)]
pub struct Zone {
    pub no: i64,
    pub code: String,
    pub name: String,
    pub main_zone_no: i64,
    pub type_no: i64,
    pub x: f64,
    pub y: f64,
    pub surface_id: i64,
    pub population: f64,
    pub employment: f64,
    pub workers: f64,
    pub students: f64,
    pub study_places: f64,
    pub pop_density: f64,
    pub comment: String,
}

#[derive(Debug, Default)]
pub struct ZoneTable {
    zones: Vec<Zone>,
    by_no: FxHashMap<i64, usize>,
}

impl ZoneTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["NO"])?;
        let mut table = ZoneTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let zone = Zone {
                no: f.require_int("NO")?,
                code: f.text("CODE"),
                name: f.text("NAME"),
                main_zone_no: f.int("MAINZONENO")?,
                type_no: f.int("TYPENO")?,
                x: f.float("XCOORD")?,
                y: f.float("YCOORD")?,
                surface_id: f.int("SURFACEID")?,
                population: f.float("POPULATION")?,
                employment: f.float("EMPLOYMENT")?,
                workers: f.float("WORKERS")?,
                students: f.float("STUDENTS")?,
                study_places: f.float("STUDYPLACES")?,
                pop_density: f.float("POPDENSITY")?,
                comment: f.text("COMMENT"),
            };
            table.by_no.entry(zone.no).or_insert(table.zones.len());
            table.zones.push(zone);
        }
        Ok(table)
    }

    pub fn get(&self, no: i64) -> Option<&Zone> {
        self.by_no.get(&no).map(|&i| &self.zones[i])
    }

    pub fn total_population(&self) -> f64 {
        self.zones.iter().map(|z| z.population).sum()
    }

    pub fn total_employment(&self) -> f64 {
        self.zones.iter().map(|z| z.employment).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
