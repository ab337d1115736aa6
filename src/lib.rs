//! Parser for PTV Visum `.net` network files, with road graph extraction.
//!
//! A `.net` file is a semicolon-delimited text export: `$NAME:HDR;HDR;...`
//! starts a section, `*` starts a comment, every other non-blank line is a
//! data row. [`Network::from_path`] materializes the known sections into
//! typed tables; [`extract_graph`] then derives a directed graph whose
//! edges carry resolved polyline geometry, lengths in meters and free-flow
//! speeds in km/h.
//!
//! ```no_run
//! use visum_net::{extract_graph, Network};
//!
//! # fn main() -> visum_net::Result<()> {
//! let net = Network::from_path("city.net")?;
//! let graph = extract_graph(&net)?;
//! for edge in graph.edges.values() {
//!     println!("{}", visum_net::wkt::linestring(&edge.geometry));
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod graph;
pub mod network;
pub mod reader;
mod record;
pub mod sections;
pub mod units;
pub mod wkt;

pub use error::{Error, Result};
pub use graph::{extract_graph, reverse_polyline, Edge, Graph, Polyline, Vertex};
pub use network::Network;
pub use reader::{read_sections, RawSection, Row};
