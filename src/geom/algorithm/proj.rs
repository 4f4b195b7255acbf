use geo::{Coord, MapCoordsInPlace};
use geojson::{Feature, Value};

use crate::geom::{FrameError, MercatorFrame};

/// Remap every position of a feature in place. Polygons only remap their exterior ring, and
/// geometry kinds other than Point, LineString and Polygon are left untouched.
fn remap_feature(feature: &mut Feature, fix: impl Fn(Coord<f64>) -> Coord<f64>) {
    let Some(geometry) = feature.geometry.as_mut() else { return };

    let fix_position = |pos: &mut Vec<f64>| {
        if let [x, y, ..] = pos.as_mut_slice() {
            let out = fix(Coord { x: *x, y: *y });
            *x = out.x;
            *y = out.y;
        }
    };

    match &mut geometry.value {
        Value::Point(pos) => fix_position(pos),
        Value::LineString(line) => line.iter_mut().for_each(fix_position),
        Value::Polygon(rings) => {
            // Interior rings are not remapped
            if let Some(exterior) = rings.first_mut() {
                exterior.iter_mut().for_each(fix_position);
            }
        }
        _ => log::trace!("[geom::proj] leaving unsupported geometry unprojected"),
    }
}

fn warn_if_degenerate(frame: &MercatorFrame) {
    if let Err(e) = frame.validate() {
        log::warn!("[geom::proj] projecting through a degenerate frame: {e}");
    }
}

/// Copy a feature from pixel space into spherical space. The input is never modified.
pub fn project_to_spherical(frame: &MercatorFrame, feature: &Feature) -> Feature {
    warn_if_degenerate(frame);
    let mut copy = feature.clone();
    remap_feature(&mut copy, |pt| frame.to_spherical(pt));
    copy
}

/// Copy a feature from spherical space into pixel space. The input is never modified.
pub fn project_to_mercator(frame: &MercatorFrame, feature: &Feature) -> Feature {
    warn_if_degenerate(frame);
    let mut copy = feature.clone();
    remap_feature(&mut copy, |pt| frame.to_mercator(pt));
    copy
}

/// Like [`project_to_spherical`], but rejects a degenerate frame instead of producing
/// non-finite coordinates.
pub fn try_project_to_spherical(frame: &MercatorFrame, feature: &Feature) -> Result<Feature, FrameError> {
    frame.validate()?;
    Ok(project_to_spherical(frame, feature))
}

/// Like [`project_to_mercator`], but rejects a degenerate frame instead of producing
/// non-finite coordinates.
pub fn try_project_to_mercator(frame: &MercatorFrame, feature: &Feature) -> Result<Feature, FrameError> {
    frame.validate()?;
    Ok(project_to_mercator(frame, feature))
}

/// Project every coordinate of a `geo` geometry from pixel space into spherical space.
/// Unlike the feature projections, this covers all rings.
pub fn project_coords_to_spherical<G: MapCoordsInPlace<f64>>(frame: &MercatorFrame, geometry: &mut G) {
    geometry.map_coords_in_place(|pt| frame.to_spherical(pt));
}

/// Project every coordinate of a `geo` geometry from spherical space into pixel space.
pub fn project_coords_to_mercator<G: MapCoordsInPlace<f64>>(frame: &MercatorFrame, geometry: &mut G) {
    geometry.map_coords_in_place(|pt| frame.to_mercator(pt));
}

#[cfg(test)]
mod tests {
    use geo::{coord, LineString, Polygon};
    use geojson::Geometry;

    use super::*;

    fn frame() -> MercatorFrame { MercatorFrame::new(0.0, 0.0, 100.0, 100.0, 200.0, 200.0) }

    fn feature(value: Value) -> Feature { Feature::from(Geometry::new(value)) }

    fn value(f: &Feature) -> &Value { &f.geometry.as_ref().unwrap().value }

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn point_at_center_pixel() {
        let out = project_to_spherical(&frame(), &feature(Value::Point(vec![100.0, 100.0])));
        assert_eq!(value(&out), &Value::Point(vec![50.0, 50.0]));
    }

    #[test]
    fn linestring_remaps_every_vertex() {
        let f = feature(Value::LineString(vec![vec![0.0, 0.0], vec![200.0, 200.0]]));
        let out = project_to_spherical(&frame(), &f);
        assert_eq!(value(&out), &Value::LineString(vec![vec![0.0, 100.0], vec![100.0, 0.0]]));
    }

    #[test]
    fn input_is_not_modified() {
        let f = feature(Value::Polygon(vec![vec![vec![0.0, 0.0], vec![200.0, 0.0], vec![0.0, 200.0], vec![0.0, 0.0]]]));
        let before = f.clone();
        let _ = project_to_spherical(&frame(), &f);
        let _ = project_to_mercator(&frame(), &f);
        assert_eq!(f, before);
    }

    #[test]
    fn polygon_interior_rings_are_left_alone() {
        let exterior = vec![vec![0.0, 0.0], vec![200.0, 0.0], vec![200.0, 200.0], vec![0.0, 0.0]];
        let hole = vec![vec![50.0, 50.0], vec![60.0, 50.0], vec![60.0, 60.0], vec![50.0, 50.0]];
        let f = feature(Value::Polygon(vec![exterior, hole.clone()]));

        let out = project_to_spherical(&frame(), &f);
        let Value::Polygon(rings) = value(&out) else { panic!("expected a polygon") };
        assert_eq!(rings[0][1], vec![100.0, 100.0]);
        assert_eq!(rings[1], hole);

        let out = project_to_mercator(&frame(), &f);
        let Value::Polygon(rings) = value(&out) else { panic!("expected a polygon") };
        assert_eq!(rings[0][1], vec![400.0, 200.0]);
        assert_eq!(rings[1], hole);
    }

    #[test]
    fn unsupported_geometry_is_copied_unchanged() {
        let f = feature(Value::MultiPoint(vec![vec![10.0, 10.0], vec![20.0, 20.0]]));
        assert_eq!(project_to_spherical(&frame(), &f), f);
        assert_eq!(project_to_mercator(&frame(), &f), f);
    }

    #[test]
    fn feature_without_geometry_is_copied_unchanged() {
        let f = Feature::default();
        assert_eq!(project_to_spherical(&frame(), &f), f);
    }

    #[test]
    fn extra_position_components_survive() {
        let out = project_to_spherical(&frame(), &feature(Value::Point(vec![100.0, 100.0, 7.0])));
        assert_eq!(value(&out), &Value::Point(vec![50.0, 50.0, 7.0]));
    }

    #[test]
    fn properties_are_preserved() {
        let mut f = feature(Value::Point(vec![0.0, 0.0]));
        f.set_property("id", 42);
        let out = project_to_mercator(&frame(), &f);
        assert_eq!(out.property("id"), Some(&serde_json::json!(42)));
    }

    #[test]
    fn round_trip_each_supported_kind() {
        let m = MercatorFrame::new(-0.13, 51.50, -0.11, 51.52, 1389.0, 2224.0);
        let features = [
            feature(Value::Point(vec![400.0, 1000.0])),
            feature(Value::LineString(vec![vec![0.0, 0.0], vec![12.5, 700.25], vec![1389.0, 2224.0]])),
            feature(Value::Polygon(vec![vec![vec![1.0, 1.0], vec![300.0, 1.0], vec![300.0, 900.0], vec![1.0, 1.0]]])),
        ];
        for f in &features {
            let back = project_to_mercator(&m, &project_to_spherical(&m, f));
            match (value(&back), value(f)) {
                (Value::Point(a), Value::Point(b)) => assert_close(a, b),
                (Value::LineString(a), Value::LineString(b)) => a.iter().zip(b).for_each(|(a, b)| assert_close(a, b)),
                (Value::Polygon(a), Value::Polygon(b)) => a[0].iter().zip(&b[0]).for_each(|(a, b)| assert_close(a, b)),
                _ => panic!("geometry kind changed"),
            }
        }
    }

    #[test]
    fn checked_projection_rejects_degenerate_frame() {
        let bad = MercatorFrame::new(1.0, 1.0, 1.0, 2.0, 10.0, 10.0);
        let f = feature(Value::Point(vec![1.0, 1.0]));
        assert_eq!(try_project_to_spherical(&bad, &f), Err(FrameError::CoincidentBounds));
        assert_eq!(try_project_to_mercator(&bad, &f), Err(FrameError::CoincidentBounds));
        assert!(try_project_to_spherical(&frame(), &f).is_ok());
    }

    #[test]
    fn geo_geometries_project_all_rings() {
        let mut polygon = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (200.0, 0.0), (200.0, 200.0)]),
            vec![LineString::from(vec![(100.0, 100.0), (120.0, 100.0), (120.0, 120.0)])],
        );
        project_coords_to_spherical(&frame(), &mut polygon);
        assert_eq!(polygon.exterior().0[0], coord! { x: 0.0, y: 100.0 });
        assert_eq!(polygon.interiors()[0].0[0], coord! { x: 50.0, y: 50.0 });

        project_coords_to_mercator(&frame(), &mut polygon);
        assert_eq!(polygon.interiors()[0].0[0], coord! { x: 100.0, y: 100.0 });
    }
}
