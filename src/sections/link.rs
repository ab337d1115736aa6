//! `$LINK` table, the row source for graph extraction.
//!
//! `LENGTH` and `V0PRT` stay as raw strings because exports attach unit
//! suffixes (`0.081km`, `50km/h`); [`crate::units`] converts on demand.

use log::warn;
use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;
use crate::sections::link_type::split_tsys_set;
use crate::units;

#[derive(Debug, Clone)]
pub struct Link {
    pub no: i64,
    pub from_node: i64,
    pub to_node: i64,
    pub name: String,
    pub type_no: i64,
    pub tsys_set: Vec<String>,
    /// 0 = both directions, 1 = from->to only, 2 = to->from only.
    pub user_direction: i64,
    /// Length as written, e.g. `0.081km`.
    pub length: String,
    pub num_lanes: i64,
    pub plan_no: i64,
    pub cap_prt: i64,
    /// Free-flow speed as written, e.g. `50km/h`.
    pub v0_prt: String,
    /// Public transport run times per system from `T_PUTSYS(...)` columns.
    pub t_putsys: FxHashMap<String, String>,
    /// Tolls per private transport system from `TOLL_PRTSYS(...)` columns.
    pub toll_by_system: FxHashMap<String, f64>,
    pub add_vals: [i64; 3],
    pub from_orientation: String,
    pub to_orientation: String,
    pub share_hgv: f64,
    pub slope: f64,
    pub urban: bool,
    pub speed_limit: i64,
    pub bridge: bool,
    pub overpass: bool,
}

impl Link {
    /// Links with a direction restriction come in one-way pairs.
    pub fn is_bidirectional(&self) -> bool {
        self.user_direction == 0
    }

    pub fn allows_system(&self, tsys: &str) -> bool {
        self.tsys_set.iter().any(|s| s == tsys)
    }

    /// Length in meters, parsed from the raw string. Errors name the link.
    pub fn length_m(&self) -> Result<f64> {
        units::parse_length(&self.length).map_err(|e| e.for_link(self.no))
    }

    /// Free-flow speed in km/h, parsed from the raw string.
    pub fn v0_kmh(&self) -> Result<f64> {
        units::parse_speed(&self.v0_prt).map_err(|e| e.for_link(self.no))
    }
}

#[derive(Debug, Default)]
pub struct LinkTable {
    links: Vec<Link>,
    by_no: FxHashMap<i64, usize>,
}

impl LinkTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["NO", "FROMNODENO", "TONODENO"])?;
        let mut table = LinkTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let no = f.require_int("NO")?;

            let t_putsys = f
                .system_values("T_PUTSYS(")
                .into_iter()
                .map(|(sys, value)| (sys, value.to_string()))
                .collect();

            let mut toll_by_system = FxHashMap::default();
            for (sys, value) in f.system_values("TOLL_PRTSYS(") {
                match value.replace(',', ".").parse::<f64>() {
                    Ok(toll) => {
                        toll_by_system.insert(sys, toll);
                    }
                    Err(_) => warn!("link {no}: ignoring unparseable toll '{value}' for {sys}"),
                }
            }

            let link = Link {
                no,
                from_node: f.require_int("FROMNODENO")?,
                to_node: f.require_int("TONODENO")?,
                name: f.text("NAME"),
                type_no: f.int("TYPENO")?,
                tsys_set: split_tsys_set(f.raw("TSYSSET")),
                user_direction: f.int("USERDIRECTION")?,
                length: f.text("LENGTH"),
                num_lanes: f.int("NUMLANES")?,
                plan_no: f.int("PLANNO")?,
                cap_prt: f.int("CAPPRT")?,
                v0_prt: f.text("V0PRT"),
                t_putsys,
                toll_by_system,
                add_vals: [f.int("ADDVAL1")?, f.int("ADDVAL2")?, f.int("ADDVAL3")?],
                from_orientation: f.text("FROMNODEORIENTATION"),
                to_orientation: f.text("TONODEORIENTATION"),
                share_hgv: f.float("SHAREHGV")?,
                slope: f.float("SLOPE")?,
                urban: f.flag("URBAN")?,
                speed_limit: f.int("SPEEDLIMIT")?,
                bridge: f.flag("BRIDGE")?,
                overpass: f.flag("OVERPASS")?,
            };
            table.by_no.entry(link.no).or_insert(table.links.len());
            table.links.push(link);
        }
        Ok(table)
    }

    /// First link with this number. Two-way roads share a number across
    /// their direction rows.
    pub fn get(&self, no: i64) -> Option<&Link> {
        self.by_no.get(&no).map(|&i| &self.links[i])
    }

    /// All links connecting the two nodes, either direction.
    pub fn between(&self, a: i64, b: i64) -> Vec<&Link> {
        self.links
            .iter()
            .filter(|l| {
                (l.from_node == a && l.to_node == b) || (l.from_node == b && l.to_node == a)
            })
            .collect()
    }

    pub fn from_node(&self, node: i64) -> Vec<&Link> {
        self.links.iter().filter(|l| l.from_node == node).collect()
    }

    /// Network length in kilometers. Unparseable lengths count as zero.
    pub fn total_length_km(&self) -> f64 {
        self.links
            .iter()
            .map(|l| l.length_m().unwrap_or(0.0) / 1000.0)
            .sum()
    }

    /// Length-weighted mean free-flow speed in km/h over links with both a
    /// positive length and a positive speed.
    pub fn average_speed_kmh(&self) -> f64 {
        let mut speed_distance = 0.0;
        let mut distance = 0.0;
        for link in &self.links {
            let length = link.length_m().unwrap_or(0.0) / 1000.0;
            let speed = link.v0_kmh().unwrap_or(0.0);
            if length > 0.0 && speed > 0.0 {
                speed_distance += length * speed;
                distance += length;
            }
        }
        if distance > 0.0 {
            speed_distance / distance
        } else {
            0.0
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
