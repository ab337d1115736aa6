//! Well-known-text rendering for graph output.

/// Formats a single coordinate pair as a WKT point.
pub fn point(x: f64, y: f64) -> String {
    format!("POINT({} {})", x, y)
}

/// Formats a polyline as a WKT linestring. An empty slice renders as
/// `LINESTRING EMPTY`.
pub fn linestring(coords: &[[f64; 2]]) -> String {
    if coords.is_empty() {
        return "LINESTRING EMPTY".to_string();
    }
    let parts: Vec<String> = coords
        .iter()
        .map(|c| format!("{} {}", c[0], c[1]))
        .collect();
    format!("LINESTRING({})", parts.join(", "))
}
