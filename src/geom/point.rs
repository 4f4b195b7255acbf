use geo::{Coord, Line, Polygon};
use serde::{Deserialize, Serialize};

/// A coordinate pair in array form, as found in GeoJSON positions.
pub type TuplePoint = [f64; 2];

/// A coordinate pair with named fields, as the backend serializes `geo` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldPoint {
    pub x: f64,
    pub y: f64,
}

impl FieldPoint {
    #[inline] pub fn new(x: f64, y: f64) -> Self { Self { x, y } }

    /// Convert to the array form.
    #[inline] pub fn to_tuple(self) -> TuplePoint { [self.x, self.y] }
}

impl From<TuplePoint> for FieldPoint {
    fn from([x, y]: TuplePoint) -> Self { Self { x, y } }
}

impl From<FieldPoint> for TuplePoint {
    fn from(pt: FieldPoint) -> Self { pt.to_tuple() }
}

impl From<Coord<f64>> for FieldPoint {
    fn from(c: Coord<f64>) -> Self { Self { x: c.x, y: c.y } }
}

impl From<FieldPoint> for Coord<f64> {
    fn from(pt: FieldPoint) -> Self { Coord { x: pt.x, y: pt.y } }
}

/// Read the first two components of a GeoJSON position.
/// Returns None for positions with fewer than two components.
#[inline]
pub fn tuple_point(position: &[f64]) -> Option<TuplePoint> {
    match position {
        [x, y, ..] => Some([*x, *y]),
        _ => None,
    }
}

/// A polygon already projected into display space.
/// Only the exterior ring is drawn; interiors are carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayPolygon {
    pub exterior: Vec<FieldPoint>,
    #[serde(default)]
    pub interiors: Vec<Vec<FieldPoint>>,
}

impl From<&Polygon<f64>> for DisplayPolygon {
    fn from(polygon: &Polygon<f64>) -> Self {
        let ring = |ls: &geo::LineString<f64>| -> Vec<FieldPoint> { ls.0.iter().copied().map(FieldPoint::from).collect() };
        Self {
            exterior: ring(polygon.exterior()),
            interiors: polygon.interiors().iter().map(ring).collect(),
        }
    }
}

/// A line segment already projected into display space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayLine {
    pub start: FieldPoint,
    pub end: FieldPoint,
}

impl From<Line<f64>> for DisplayLine {
    fn from(line: Line<f64>) -> Self {
        Self { start: line.start.into(), end: line.end.into() }
    }
}
