//! Coordinate formatting for SVG `points` attributes and `<line>` endpoints.

use serde::{Deserialize, Serialize};

use crate::geom::{tuple_point, DisplayLine, DisplayPolygon, FieldPoint, TuplePoint};

/// Endpoint attributes for an SVG `<line>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathEndpoints {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Shortest decimal form of a coordinate, the way the browser prints numbers for small and
/// moderate magnitudes. Negative zero prints as `0` and infinities as `Infinity`. Very large or
/// very small magnitudes stay in positional notation (`1e21` prints as 22 digits) where JS would
/// switch to exponent form; both parse as the same SVG number.
fn format_coord(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else {
        v.to_string()
    }
}

#[inline]
fn join_points(points: impl Iterator<Item = TuplePoint>) -> String {
    points.map(|[x, y]| format!("{},{}", format_coord(x), format_coord(y))).collect::<Vec<_>>().join(" ")
}

/// Format coordinate pairs as a space-separated list of `x,y` tokens.
pub fn points_to_path_string(points: &[TuplePoint]) -> String {
    join_points(points.iter().copied())
}

/// Format GeoJSON positions the same way. Positions with fewer than two components are skipped.
pub fn positions_to_path_string(positions: &[Vec<f64>]) -> String {
    join_points(positions.iter().filter_map(|pos| tuple_point(pos)))
}

/// Format the exterior ring of a display-space polygon.
pub fn polygon_to_path_string(polygon: &DisplayPolygon) -> String {
    join_points(polygon.exterior.iter().map(|pt| pt.to_tuple()))
}

/// Restructure a segment into `<line>` endpoint attributes.
pub fn line_to_path_endpoints(line: &DisplayLine) -> PathEndpoints {
    let DisplayLine { start: FieldPoint { x: x1, y: y1 }, end: FieldPoint { x: x2, y: y2 } } = *line;
    PathEndpoints { x1, y1, x2, y2 }
}
