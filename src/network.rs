//! The parsed network store: one optional typed table per known section.
//!
//! Unrecognized sections are kept verbatim so diagnostic tooling can still
//! reach them. Geometry assembly helpers mirror the layered format: edges
//! reference points, faces reference edges, surfaces reference faces.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::error::Result;
use crate::reader::{read_sections, RawSection};
use crate::sections::{
    BlockItemTypeTable, CalendarPeriodTable, ConnectorTable, DemandSegmentTable, DirectionTable,
    EdgeItemTable, EdgePrimitiveTable, FaceItemTable, FaceTable, FareModel, InfoTable, LinkPolyTable,
    LinkTable, LinkTypeTable, ModeTable, NetworkParams, NodeTable, PoiCategoryTable, PointTable,
    SurfaceItemTable, SurfaceTable, TransportSystemTable, TurnTable, UserAttrDefTable,
    ValidDayTable, VehicleCombinationTable, VehicleUnitTable, VehicleUnitToCombinationTable,
    Version, ZoneTable,
};

/// Everything a `.net` file contained. Absent sections stay `None`.
#[derive(Debug, Default)]
pub struct Network {
    pub version: Option<Version>,
    pub info: Option<InfoTable>,
    pub poi_categories: Option<PoiCategoryTable>,
    pub user_attr_defs: Option<UserAttrDefTable>,
    pub calendar_periods: Option<CalendarPeriodTable>,
    pub valid_days: Option<ValidDayTable>,
    pub params: Option<NetworkParams>,
    pub transport_systems: Option<TransportSystemTable>,
    pub modes: Option<ModeTable>,
    pub demand_segments: Option<DemandSegmentTable>,
    pub block_item_types: Option<BlockItemTypeTable>,
    pub fare_model: Option<FareModel>,
    pub vehicle_units: Option<VehicleUnitTable>,
    pub vehicle_combinations: Option<VehicleCombinationTable>,
    pub vehicle_unit_mappings: Option<VehicleUnitToCombinationTable>,
    pub directions: Option<DirectionTable>,
    pub points: Option<PointTable>,
    pub edge_primitives: Option<EdgePrimitiveTable>,
    pub edge_items: Option<EdgeItemTable>,
    pub faces: Option<FaceTable>,
    pub face_items: Option<FaceItemTable>,
    pub surfaces: Option<SurfaceTable>,
    pub surface_items: Option<SurfaceItemTable>,
    pub nodes: Option<NodeTable>,
    pub zones: Option<ZoneTable>,
    pub link_types: Option<LinkTypeTable>,
    pub links: Option<LinkTable>,
    pub link_polys: Option<LinkPolyTable>,
    pub turns: Option<TurnTable>,
    pub connectors: Option<ConnectorTable>,
    unknown: Vec<RawSection>,
}

impl Network {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Network> {
        let file = File::open(path)?;
        Network::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Network> {
        Network::from_sections(read_sections(reader)?)
    }

    pub fn from_sections(sections: Vec<RawSection>) -> Result<Network> {
        let total = sections.len();
        let mut net = Network::default();
        for raw in sections {
            if net.absorb(&raw)? {
                continue;
            }
            debug!(
                "retaining unrecognized section ${} ({} rows)",
                raw.name,
                raw.rows.len()
            );
            net.unknown.push(raw);
        }
        info!(
            "network loaded: {} sections, {} retained raw",
            total,
            net.unknown.len()
        );
        Ok(net)
    }

    /// Parses one recognized section into its table. Returns `Ok(false)`
    /// when the name is not recognized.
    fn absorb(&mut self, raw: &RawSection) -> Result<bool> {
        match raw.name.as_str() {
            "VERSION" => self.version = Some(Version::parse(raw)?),
            "INFO" => self.info = Some(InfoTable::parse(raw)?),
            "POICATEGORY" => self.poi_categories = Some(PoiCategoryTable::parse(raw)?),
            "USERATTDEF" => self.user_attr_defs = Some(UserAttrDefTable::parse(raw)?),
            "CALENDARPERIOD" => self.calendar_periods = Some(CalendarPeriodTable::parse(raw)?),
            "VALIDDAYS" => self.valid_days = Some(ValidDayTable::parse(raw)?),
            "NETWORK" => self.params = Some(NetworkParams::parse(raw)?),
            "TSYS" => self.transport_systems = Some(TransportSystemTable::parse(raw)?),
            "MODE" => self.modes = Some(ModeTable::parse(raw)?),
            "DEMANDSEGMENT" => self.demand_segments = Some(DemandSegmentTable::parse(raw)?),
            "BLOCKITEMTYPE" => self.block_item_types = Some(BlockItemTypeTable::parse(raw)?),
            "FAREMODEL" => self.fare_model = Some(FareModel::parse(raw)?),
            "VEHUNIT" => self.vehicle_units = Some(VehicleUnitTable::parse(raw)?),
            "VEHCOMB" => self.vehicle_combinations = Some(VehicleCombinationTable::parse(raw)?),
            "VEHUNITTOVEHCOMB" => {
                self.vehicle_unit_mappings = Some(VehicleUnitToCombinationTable::parse(raw)?)
            }
            "DIRECTION" => self.directions = Some(DirectionTable::parse(raw)?),
            "POINT" => self.points = Some(PointTable::parse(raw)?),
            "EDGE" => self.edge_primitives = Some(EdgePrimitiveTable::parse(raw)?),
            "EDGEITEM" => self.edge_items = Some(EdgeItemTable::parse(raw)?),
            "FACE" => self.faces = Some(FaceTable::parse(raw)?),
            "FACEITEM" => self.face_items = Some(FaceItemTable::parse(raw)?),
            "SURFACE" => self.surfaces = Some(SurfaceTable::parse(raw)?),
            "SURFACEITEM" => self.surface_items = Some(SurfaceItemTable::parse(raw)?),
            "NODE" => self.nodes = Some(NodeTable::parse(raw)?),
            "ZONE" => self.zones = Some(ZoneTable::parse(raw)?),
            "LINKTYPE" => self.link_types = Some(LinkTypeTable::parse(raw)?),
            "LINK" => self.links = Some(LinkTable::parse(raw)?),
            "LINKPOLY" => self.link_polys = Some(LinkPolyTable::parse(raw)?),
            "TURN" => self.turns = Some(TurnTable::parse(raw)?),
            "CONNECTOR" => self.connectors = Some(ConnectorTable::parse(raw)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Sections the store has no typed table for, in file order.
    pub fn unknown_sections(&self) -> &[RawSection] {
        &self.unknown
    }

    /// One retained section by (case-insensitive) name.
    pub fn unknown_section(&self, name: &str) -> Option<&RawSection> {
        let name = name.to_uppercase();
        self.unknown.iter().find(|s| s.name == name)
    }

    /// Full polyline of an `$EDGE` primitive: from-point, intermediate
    /// points sorted by index, to-point. Dangling references are skipped,
    /// so the result can be shorter than expected or empty.
    pub fn edge_geometry(&self, edge_id: i64) -> Vec<[f64; 2]> {
        let mut coords = Vec::new();
        let edge = self
            .edge_primitives
            .as_ref()
            .and_then(|edges| edges.get(edge_id));
        if let (Some(edge), Some(points)) = (edge, &self.points) {
            if let Some(from) = points.get(edge.from_point) {
                coords.push([from.x, from.y]);
            }
        }
        if let Some(items) = &self.edge_items {
            for item in items.items_for(edge_id) {
                coords.push([item.x, item.y]);
            }
        }
        if let (Some(edge), Some(points)) = (edge, &self.points) {
            if let Some(to) = points.get(edge.to_point) {
                coords.push([to.x, to.y]);
            }
        }
        coords
    }

    /// Planar length of an edge primitive's polyline. Zero when the
    /// geometry has fewer than two points.
    pub fn edge_length(&self, edge_id: i64) -> f64 {
        polyline_length_2d(&self.edge_geometry(edge_id))
    }

    /// Ring polyline of a `$FACE`: each item contributes its edge's start
    /// point (swapped when the item runs the edge in reverse), and the
    /// final item also contributes its end point to close the ring.
    pub fn face_geometry(&self, face_id: i64) -> Vec<[f64; 2]> {
        let mut coords = Vec::new();
        let (Some(face_items), Some(edges), Some(points)) =
            (&self.face_items, &self.edge_primitives, &self.points)
        else {
            return coords;
        };
        let items = face_items.items_for(face_id);
        let last = items.len().saturating_sub(1);
        for (i, item) in items.iter().enumerate() {
            let Some(edge) = edges.get(item.edge_id) else {
                continue;
            };
            let (from_id, to_id) = if item.reversed {
                (edge.to_point, edge.from_point)
            } else {
                (edge.from_point, edge.to_point)
            };
            if let Some(from) = points.get(from_id) {
                coords.push([from.x, from.y]);
            }
            if i == last {
                if let Some(to) = points.get(to_id) {
                    coords.push([to.x, to.y]);
                }
            }
        }
        coords
    }

    /// Planar shoelace area of a face ring. Zero for degenerate rings.
    pub fn face_area(&self, face_id: i64) -> f64 {
        let mut coords = self.face_geometry(face_id);
        if coords.len() < 3 {
            return 0.0;
        }
        if coords.first() != coords.last() {
            coords.push(coords[0]);
        }
        let mut area = 0.0;
        for pair in coords.windows(2) {
            area += pair[0][0] * pair[1][1] - pair[1][0] * pair[0][1];
        }
        area.abs() / 2.0
    }
}

fn polyline_length_2d(coords: &[[f64; 2]]) -> f64 {
    if coords.len() < 2 {
        return 0.0;
    }
    coords
        .windows(2)
        .map(|pair| {
            let dx = pair[1][0] - pair[0][0];
            let dy = pair[1][1] - pair[0][1];
            (dx * dx + dy * dy).sqrt()
        })
        .sum()
}
