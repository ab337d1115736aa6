//! Typed tables for the known `.net` sections.
//!
//! Every table parses from a [`crate::reader::RawSection`] through the
//! header-driven accessors in [`crate::record`], so column order in the
//! file never matters. Row order is preserved.

pub mod calendar;
pub mod connector;
pub mod geometry;
pub mod link;
pub mod link_poly;
pub mod link_type;
pub mod misc;
pub mod node;
pub mod settings;
pub mod tsys;
pub mod turn;
pub mod vehicles;
pub mod version;
pub mod zone;

pub use calendar::{CalendarPeriod, CalendarPeriodTable, ValidDay, ValidDayTable};
pub use connector::{Connector, ConnectorTable};
pub use geometry::{
    EdgeItem, EdgeItemTable, EdgePrimitive, EdgePrimitiveTable, Face, FaceItem, FaceItemTable,
    FaceTable, Point, PointTable, Surface, SurfaceItem, SurfaceItemTable, SurfaceTable,
};
pub use link::{Link, LinkTable};
pub use link_poly::{LinkPolyPoint, LinkPolyTable};
pub use link_type::{LinkType, LinkTypeTable};
pub use misc::{
    BlockItemType, BlockItemTypeTable, Direction, DirectionTable, FareModel, PoiCategory,
    PoiCategoryTable, UserAttrDef, UserAttrDefTable,
};
pub use node::{Node, NodeTable};
pub use settings::NetworkParams;
pub use tsys::{
    DemandSegment, DemandSegmentTable, Mode, ModeTable, TransportSystem, TransportSystemTable,
};
pub use turn::{Turn, TurnTable};
pub use vehicles::{
    VehicleCombination, VehicleCombinationTable, VehicleUnit, VehicleUnitTable,
    VehicleUnitToCombination, VehicleUnitToCombinationTable,
};
pub use version::{Info, InfoTable, Version};
pub use zone::{Zone, ZoneTable};
