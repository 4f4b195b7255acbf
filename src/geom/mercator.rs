use std::fmt;

use geo::{BoundingRect, Coord, Distance, Haversine, Point, Rect};
use serde::{Deserialize, Serialize};

/// Affine mapping between a map view's pixel space and WGS84 (spherical) space.
///
/// `(x1, y1)` and `(x2, y2)` are the southwest and northeast corners in degrees. `width` and
/// `height` size the pixel space, whose origin is the top-left corner with y growing down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MercatorFrame {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub height: f64,
}

/// Why a frame cannot map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// A bound or dimension is NaN or infinite.
    NonFinite,
    /// Width or height is zero or negative.
    ZeroSize,
    /// The bounds collapse onto a line or point.
    CoincidentBounds,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::NonFinite => write!(f, "mercator frame has non-finite bounds or size"),
            FrameError::ZeroSize => write!(f, "mercator frame has zero width or height"),
            FrameError::CoincidentBounds => write!(f, "mercator frame bounds are coincident"),
        }
    }
}

impl std::error::Error for FrameError {}

impl MercatorFrame {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, width: f64, height: f64) -> Self {
        Self { x1, y1, x2, y2, width, height }
    }

    /// Build a frame covering some WGS84 geometry. Width and height are the haversine lengths
    /// in meters of the southern and western edges of its bounding box.
    /// Returns None for geometry without a bounding box (e.g. an empty collection).
    pub fn from_geometry<T: BoundingRect<f64>>(geometry: T) -> Option<Self> {
        let bounds: Option<Rect<f64>> = geometry.bounding_rect().into();
        let bounds = bounds?;
        let (min, max) = (bounds.min(), bounds.max());
        let sw = Point::new(min.x, min.y);
        let width = Haversine.distance(sw, Point::new(max.x, min.y));
        let height = Haversine.distance(sw, Point::new(min.x, max.y));
        Some(Self::new(min.x, min.y, max.x, max.y, width, height))
    }

    /// Get the WGS84 bounds as a rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect<f64> {
        Rect::new(Coord { x: self.x1, y: self.y1 }, Coord { x: self.x2, y: self.y2 })
    }

    /// Map a pixel-space coordinate into spherical space (the y axis flips).
    #[inline]
    pub fn to_spherical(&self, pt: Coord<f64>) -> Coord<f64> {
        let x = self.x1 + (pt.x / self.width) * (self.x2 - self.x1);
        let y = self.y1 + ((self.y2 - self.y1) * (self.height - pt.y)) / self.height;
        Coord { x, y }
    }

    /// Map a spherical coordinate into pixel space, so the northernmost latitude lands at y = 0.
    #[inline]
    pub fn to_mercator(&self, pt: Coord<f64>) -> Coord<f64> {
        let x = self.width * (pt.x - self.x1) / (self.x2 - self.x1);
        let y = self.height - self.height * (pt.y - self.y1) / (self.y2 - self.y1);
        Coord { x, y }
    }

    /// Check that mapping through this frame in either direction yields finite coordinates.
    pub fn validate(&self) -> Result<(), FrameError> {
        let fields = [self.x1, self.y1, self.x2, self.y2, self.width, self.height];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(FrameError::NonFinite);
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(FrameError::ZeroSize);
        }
        if self.x1 == self.x2 || self.y1 == self.y2 {
            return Err(FrameError::CoincidentBounds);
        }
        Ok(())
    }

    #[inline] pub fn is_degenerate(&self) -> bool { self.validate().is_err() }
}

#[cfg(test)]
mod tests {
    use geo::{coord, LineString, Polygon};

    use super::*;

    fn frame() -> MercatorFrame { MercatorFrame::new(0.0, 0.0, 100.0, 100.0, 200.0, 200.0) }

    fn close(a: Coord<f64>, b: Coord<f64>) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn center_pixel_maps_to_center_of_bounds() {
        assert_eq!(frame().to_spherical(coord! { x: 100.0, y: 100.0 }), coord! { x: 50.0, y: 50.0 });
    }

    #[test]
    fn pixel_origin_is_north_west() {
        let f = frame();
        assert_eq!(f.to_spherical(coord! { x: 0.0, y: 0.0 }), coord! { x: 0.0, y: 100.0 });
        assert_eq!(f.to_mercator(coord! { x: 0.0, y: 100.0 }), coord! { x: 0.0, y: 0.0 });
        assert_eq!(f.to_mercator(coord! { x: 100.0, y: 0.0 }), coord! { x: 200.0, y: 200.0 });
    }

    #[test]
    fn round_trip_with_offset_bounds() {
        let f = MercatorFrame::new(-122.35, 47.60, -122.30, 47.65, 3765.2, 5559.7);
        for pt in [coord! { x: 0.0, y: 0.0 }, coord! { x: 1234.5, y: 987.6 }, coord! { x: 3765.2, y: 5559.7 }] {
            assert!(close(f.to_mercator(f.to_spherical(pt)), pt));
        }
    }

    #[test]
    fn validate_flags_degenerate_frames() {
        assert_eq!(frame().validate(), Ok(()));
        assert_eq!(MercatorFrame::new(0.0, 0.0, 0.0, 1.0, 1.0, 1.0).validate(), Err(FrameError::CoincidentBounds));
        assert_eq!(MercatorFrame::new(0.0, 0.0, 1.0, 1.0, 0.0, 1.0).validate(), Err(FrameError::ZeroSize));
        assert_eq!(MercatorFrame::new(f64::NAN, 0.0, 1.0, 1.0, 1.0, 1.0).validate(), Err(FrameError::NonFinite));
        assert!(MercatorFrame::new(0.0, 0.0, 1.0, 1.0, 1.0, 0.0).is_degenerate());
    }

    #[test]
    fn degenerate_frame_yields_non_finite_coordinates() {
        let f = MercatorFrame::new(5.0, 0.0, 5.0, 10.0, 0.0, 10.0);
        let out = f.to_spherical(coord! { x: 1.0, y: 1.0 });
        assert!(!out.x.is_finite());
        let back = f.to_mercator(coord! { x: 1.0, y: 1.0 });
        assert!(!back.x.is_finite());
    }

    #[test]
    fn from_geometry_measures_bounds_in_meters() {
        let polygon = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (0.01, 0.0), (0.01, 0.01), (0.0, 0.01)]),
            vec![],
        );
        let f = MercatorFrame::from_geometry(polygon).unwrap();
        assert_eq!((f.x1, f.y1, f.x2, f.y2), (0.0, 0.0, 0.01, 0.01));
        // 0.01 degrees at the equator is a little over a kilometer
        assert!(f.width > 1100.0 && f.width < 1120.0, "width = {}", f.width);
        assert!((f.width - f.height).abs() < 1.0);
    }

    #[test]
    fn from_empty_collection_is_none() {
        let empty = geo::GeometryCollection::<f64>::new_from(vec![]);
        assert!(MercatorFrame::from_geometry(empty).is_none());
    }

    #[test]
    fn serializes_as_six_named_fields() {
        let json = serde_json::to_value(frame()).unwrap();
        assert_eq!(json, serde_json::json!({"x1": 0.0, "y1": 0.0, "x2": 100.0, "y2": 100.0, "width": 200.0, "height": 200.0}));
    }
}
