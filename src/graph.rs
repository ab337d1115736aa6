//! Road graph extraction.
//!
//! Turns a parsed [`Network`] into a directed graph: one vertex per node,
//! one edge per link row in file order. Each edge carries a polyline
//! resolved from the richest geometry source available for its link, so
//! straight two-node lines only remain where the file truly has no shape
//! data.

use std::collections::HashMap;

use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::network::Network;
use crate::sections::Link;

/// Planar coordinates, in file order.
pub type Polyline = Vec<[f64; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: i64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Sequential id assigned during extraction, starting at 1. Not the
    /// link number; two-way roads produce two edges from one number.
    pub id: i64,
    pub source: i64,
    pub target: i64,
    pub geometry: Polyline,
    pub link_id: i64,
    pub lanes: i64,
    /// Meters.
    pub length_m: f64,
    /// Kilometers per hour.
    pub free_flow_kmh: f64,
    pub capacity: i64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Graph {
    pub vertices: HashMap<i64, Vertex>,
    pub edges: HashMap<i64, Edge>,
}

/// Builds the graph, or fails as a whole: any dangling node reference,
/// unresolvable geometry or malformed length/speed aborts extraction.
pub fn extract_graph(net: &Network) -> Result<Graph> {
    let nodes = net
        .nodes
        .as_ref()
        .filter(|t| !t.is_empty())
        .ok_or(Error::EmptyTable { table: "node" })?;
    let links = net
        .links
        .as_ref()
        .filter(|t| !t.is_empty())
        .ok_or(Error::EmptyTable { table: "link" })?;

    let mut vertices = HashMap::with_capacity(nodes.len());
    for node in nodes.iter() {
        vertices.insert(
            node.no,
            Vertex {
                id: node.no,
                x: node.x,
                y: node.y,
            },
        );
    }

    // Arena plus (from, to) -> arena index, so a later link can rewrite an
    // earlier edge's geometry in place.
    let mut arena: Vec<Edge> = Vec::with_capacity(links.len());
    let mut reverse: FxHashMap<(i64, i64), usize> = FxHashMap::default();

    for link in links.iter() {
        let from = vertices.get(&link.from_node).ok_or(Error::UnknownNode {
            end: "from",
            node: link.from_node,
            link: link.no,
        })?;
        let to = vertices.get(&link.to_node).ok_or(Error::UnknownNode {
            end: "to",
            node: link.to_node,
            link: link.no,
        })?;
        let from = *from;
        let to = *to;

        let geometry = resolve_geometry(net, link, &from, &to, &mut arena, &reverse)
            .ok_or(Error::MissingGeometry(link.no))?;

        let edge = Edge {
            id: arena.len() as i64 + 1,
            source: link.from_node,
            target: link.to_node,
            geometry,
            link_id: link.no,
            lanes: link.num_lanes,
            length_m: link.length_m()?,
            free_flow_kmh: link.v0_kmh()?,
            capacity: link.cap_prt,
        };
        reverse.insert((link.from_node, link.to_node), arena.len());
        arena.push(edge);
    }

    info!(
        "extracted graph: {} vertices, {} edges",
        vertices.len(),
        arena.len()
    );

    let mut edges = HashMap::with_capacity(arena.len());
    for edge in arena {
        edges.insert(edge.id, edge);
    }
    Ok(Graph { vertices, edges })
}

/// Picks the best geometry for one link. Sources in priority order:
///
/// 1. Intermediate points recorded under the link's own number, sorted by
///    index (ties keep file order), wrapped in the endpoint vertices.
/// 2. The link polygon for this exact (from, to) direction, when it has at
///    least two points. Also refreshes an already-built opposite edge that
///    is still a straight line, since its polygon row pair arrives later.
/// 3. The already-built opposite edge's shape, reversed, when it has more
///    than two points.
/// 4. A straight line between the endpoints.
fn resolve_geometry(
    net: &Network,
    link: &Link,
    from: &Vertex,
    to: &Vertex,
    arena: &mut [Edge],
    reverse: &FxHashMap<(i64, i64), usize>,
) -> Option<Polyline> {
    if let Some(items) = &net.edge_items {
        let points = items.items_for(link.no);
        if !points.is_empty() {
            let mut geometry = Polyline::with_capacity(points.len() + 2);
            geometry.push([from.x, from.y]);
            for item in points {
                geometry.push([item.x, item.y]);
            }
            geometry.push([to.x, to.y]);
            return Some(geometry);
        }
    }

    if let Some(polys) = &net.link_polys {
        let points = polys.points_for(link.from_node, link.to_node);
        if points.len() >= 2 {
            let mut geometry = Polyline::with_capacity(points.len() + 2);
            geometry.push([from.x, from.y]);
            for point in points {
                geometry.push([point.x, point.y]);
            }
            geometry.push([to.x, to.y]);
            if let Some(&i) = reverse.get(&(link.to_node, link.from_node)) {
                if arena[i].geometry.len() == 2 {
                    arena[i].geometry = reverse_polyline(&geometry);
                }
            }
            return Some(geometry);
        }
    }

    if let Some(&i) = reverse.get(&(link.to_node, link.from_node)) {
        if arena[i].geometry.len() != 2 {
            return Some(reverse_polyline(&arena[i].geometry));
        }
    }

    Some(vec![[from.x, from.y], [to.x, to.y]])
}

/// Fresh reversed copy; the input stays untouched.
pub fn reverse_polyline(geometry: &[[f64; 2]]) -> Polyline {
    geometry.iter().rev().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn net(input: &str) -> Network {
        Network::from_reader(Cursor::new(input)).unwrap()
    }

    const TWO_NODES: &str = "\
$NODE:NO;XCOORD;YCOORD
1;0;0
2;10;0
";

    #[test]
    fn test_reverse_polyline() {
        let original = vec![[0.0, 0.0], [3.0, 1.0], [10.0, 0.0]];
        let reversed = reverse_polyline(&original);
        assert_eq!(reversed, vec![[10.0, 0.0], [3.0, 1.0], [0.0, 0.0]]);
        assert_eq!(original[0], [0.0, 0.0]);
    }

    #[test]
    fn test_straight_line_fallback() {
        let input = format!(
            "{TWO_NODES}\n$LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n1;1;2;10m;50km/h\n"
        );
        let graph = extract_graph(&net(&input)).unwrap();
        assert_eq!(graph.vertices.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        let edge = &graph.edges[&1];
        assert_eq!(edge.geometry, vec![[0.0, 0.0], [10.0, 0.0]]);
        assert_eq!(edge.source, 1);
        assert_eq!(edge.target, 2);
    }

    #[test]
    fn test_intermediate_points_sorted_by_index() {
        // Items arrive index 2 before index 1; geometry must still run
        // from -> (3,1) -> (7,1) -> to.
        let input = format!(
            "{TWO_NODES}\n\
             $EDGEITEM:EDGEID;INDEX;XCOORD;YCOORD\n\
             1;2;7;1\n\
             1;1;3;1\n\
             $LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n\
             1;1;2;10m;50km/h\n"
        );
        let graph = extract_graph(&net(&input)).unwrap();
        assert_eq!(
            graph.edges[&1].geometry,
            vec![[0.0, 0.0], [3.0, 1.0], [7.0, 1.0], [10.0, 0.0]]
        );
    }

    #[test]
    fn test_duplicate_indices_keep_file_order() {
        let input = format!(
            "{TWO_NODES}\n\
             $EDGEITEM:EDGEID;INDEX;XCOORD;YCOORD\n\
             1;1;3;1\n\
             1;1;7;1\n\
             $LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n\
             1;1;2;10m;50km/h\n"
        );
        let graph = extract_graph(&net(&input)).unwrap();
        assert_eq!(
            graph.edges[&1].geometry,
            vec![[0.0, 0.0], [3.0, 1.0], [7.0, 1.0], [10.0, 0.0]]
        );
    }

    #[test]
    fn test_intermediate_points_beat_link_polygon() {
        let input = format!(
            "{TWO_NODES}\n\
             $EDGEITEM:EDGEID;INDEX;XCOORD;YCOORD\n\
             1;1;5;5\n\
             $LINKPOLY:FROMNODENO;TONODENO;INDEX;XCOORD;YCOORD;ZCOORD\n\
             1;2;1;2;2;0\n\
             1;2;2;8;8;0\n\
             $LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n\
             1;1;2;10m;50km/h\n"
        );
        let graph = extract_graph(&net(&input)).unwrap();
        assert_eq!(
            graph.edges[&1].geometry,
            vec![[0.0, 0.0], [5.0, 5.0], [10.0, 0.0]]
        );
    }

    #[test]
    fn test_link_polygon_geometry() {
        let input = format!(
            "{TWO_NODES}\n\
             $LINKPOLY:FROMNODENO;TONODENO;INDEX;XCOORD;YCOORD;ZCOORD\n\
             1;2;1;3;1;0\n\
             1;2;2;7;1;5\n\
             $LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n\
             1;1;2;10m;50km/h\n"
        );
        let graph = extract_graph(&net(&input)).unwrap();
        // Elevation is dropped, endpoints are anchored to the vertices.
        assert_eq!(
            graph.edges[&1].geometry,
            vec![[0.0, 0.0], [3.0, 1.0], [7.0, 1.0], [10.0, 0.0]]
        );
    }

    #[test]
    fn test_single_polygon_point_falls_through() {
        // One polygon point is not a usable shape; the resolver drops to
        // the straight-line fallback.
        let input = format!(
            "{TWO_NODES}\n\
             $LINKPOLY:FROMNODENO;TONODENO;INDEX;XCOORD;YCOORD;ZCOORD\n\
             1;2;1;5;5;0\n\
             $LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n\
             1;1;2;10m;50km/h\n"
        );
        let graph = extract_graph(&net(&input)).unwrap();
        assert_eq!(graph.edges[&1].geometry, vec![[0.0, 0.0], [10.0, 0.0]]);
    }

    #[test]
    fn test_back_fill_of_straight_opposite_edge() {
        // The forward row has no shape of its own and is built straight.
        // Its opposite row carries the polygon and must rewrite the forward
        // edge in place with the mirrored shape.
        let input = format!(
            "{TWO_NODES}\n\
             $LINKPOLY:FROMNODENO;TONODENO;INDEX;XCOORD;YCOORD;ZCOORD\n\
             2;1;1;7;1;0\n\
             2;1;2;3;1;0\n\
             $LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n\
             1;1;2;10m;50km/h\n\
             1;2;1;10m;50km/h\n"
        );
        let graph = extract_graph(&net(&input)).unwrap();
        assert_eq!(
            graph.edges[&2].geometry,
            vec![[10.0, 0.0], [7.0, 1.0], [3.0, 1.0], [0.0, 0.0]]
        );
        assert_eq!(
            graph.edges[&1].geometry,
            vec![[0.0, 0.0], [3.0, 1.0], [7.0, 1.0], [10.0, 0.0]]
        );
    }

    #[test]
    fn test_back_fill_targets_latest_duplicate_pair() {
        // Two rows share the (1, 2) direction; the lookup keeps the later
        // one, so only edge 2 is rewritten.
        let input = format!(
            "{TWO_NODES}\n\
             $LINKPOLY:FROMNODENO;TONODENO;INDEX;XCOORD;YCOORD;ZCOORD\n\
             2;1;1;7;1;0\n\
             2;1;2;3;1;0\n\
             $LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n\
             1;1;2;10m;50km/h\n\
             2;1;2;10m;50km/h\n\
             3;2;1;10m;50km/h\n"
        );
        let graph = extract_graph(&net(&input)).unwrap();
        assert_eq!(graph.edges[&1].geometry, vec![[0.0, 0.0], [10.0, 0.0]]);
        assert_eq!(
            graph.edges[&2].geometry,
            vec![[0.0, 0.0], [3.0, 1.0], [7.0, 1.0], [10.0, 0.0]]
        );
    }

    #[test]
    fn test_mirror_of_shaped_opposite_edge() {
        // Link 1 gets real shape from its items; link 2 has no source of
        // its own and mirrors it.
        let input = format!(
            "{TWO_NODES}\n\
             $EDGEITEM:EDGEID;INDEX;XCOORD;YCOORD\n\
             1;1;3;1\n\
             1;2;7;1\n\
             $LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n\
             1;1;2;10m;50km/h\n\
             2;2;1;10m;50km/h\n"
        );
        let graph = extract_graph(&net(&input)).unwrap();
        assert_eq!(
            graph.edges[&2].geometry,
            vec![[10.0, 0.0], [7.0, 1.0], [3.0, 1.0], [0.0, 0.0]]
        );
        // The mirrored source stays intact.
        assert_eq!(
            graph.edges[&1].geometry,
            vec![[0.0, 0.0], [3.0, 1.0], [7.0, 1.0], [10.0, 0.0]]
        );
    }

    #[test]
    fn test_sequential_edge_ids_and_link_ids() {
        let input = format!(
            "{TWO_NODES}3;5;5\n\
             $LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n\
             10;1;2;10m;50km/h\n\
             10;2;1;10m;50km/h\n\
             11;2;3;10m;50km/h\n"
        );
        let graph = extract_graph(&net(&input)).unwrap();
        let mut ids: Vec<i64> = graph.edges.keys().copied().collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(graph.edges[&1].link_id, 10);
        assert_eq!(graph.edges[&3].link_id, 11);
    }

    #[test]
    fn test_units_parsed_into_edges() {
        let input = format!(
            "{TWO_NODES}3;20;0\n\
             $LINK:NO;FROMNODENO;TONODENO;LENGTH;NUMLANES;CAPPRT;V0PRT\n\
             1;1;2;0.081km;2;1200;50km/h\n\
             2;2;3;500;1;800;30km/h\n"
        );
        let graph = extract_graph(&net(&input)).unwrap();
        assert!((graph.edges[&1].length_m - 81.0).abs() < 1e-9);
        assert_eq!(graph.edges[&1].free_flow_kmh, 50.0);
        assert_eq!(graph.edges[&1].lanes, 2);
        assert_eq!(graph.edges[&1].capacity, 1200);
        // A bare number is meters.
        assert_eq!(graph.edges[&2].length_m, 500.0);
    }

    #[test]
    fn test_dangling_node_fails_whole_build() {
        let input = format!(
            "{TWO_NODES}\n$LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n7;1;99;10m;50km/h\n"
        );
        let err = extract_graph(&net(&input)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("99"), "unexpected message: {msg}");
        assert!(msg.contains("link 7"), "unexpected message: {msg}");
    }

    #[test]
    fn test_malformed_length_fails_whole_build() {
        let input = format!(
            "{TWO_NODES}\n$LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n7;1;2;abc;50km/h\n"
        );
        let err = extract_graph(&net(&input)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("link 7"), "unexpected message: {msg}");
        assert!(msg.contains("abc"), "unexpected message: {msg}");
    }

    #[test]
    fn test_missing_or_empty_tables_fail() {
        let err = extract_graph(&net("$NODE:NO;XCOORD;YCOORD\n1;0;0\n")).unwrap_err();
        assert!(err.to_string().contains("link"));

        let err = extract_graph(&net("$LINK:NO;FROMNODENO;TONODENO\n1;1;2\n")).unwrap_err();
        assert!(err.to_string().contains("node"));

        // Present but empty sections count as missing.
        let input = "$NODE:NO;XCOORD;YCOORD\n$LINK:NO;FROMNODENO;TONODENO\n1;1;2\n";
        let err = extract_graph(&net(input)).unwrap_err();
        assert!(err.to_string().contains("node"));
    }

    #[test]
    fn test_every_edge_endpoint_is_a_vertex() {
        let input = format!(
            "{TWO_NODES}3;5;-5\n\
             $LINK:NO;FROMNODENO;TONODENO;LENGTH;V0PRT\n\
             1;1;2;10m;50km/h\n\
             2;2;3;10m;30km/h\n\
             3;3;1;10m;30km/h\n"
        );
        let graph = extract_graph(&net(&input)).unwrap();
        for edge in graph.edges.values() {
            let source = &graph.vertices[&edge.source];
            let target = &graph.vertices[&edge.target];
            assert_eq!(edge.geometry.first(), Some(&[source.x, source.y]));
            assert_eq!(edge.geometry.last(), Some(&[target.x, target.y]));
            assert!(edge.geometry.len() >= 2);
        }
    }
}
