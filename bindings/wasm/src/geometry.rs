use roadwidth_core::geojson::Feature;
use roadwidth_core::{DisplayLine, DisplayPolygon, MercatorFrame};
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use crate::common::*;

/// Format `[[x, y], ...]` as an SVG `points` attribute: `"x,y x,y ..."`.
#[wasm_bindgen(js_name = "pointsToPathString")]
pub fn points_to_path_string(points: JsValue) -> Result<String, JsValue> {
    let points: Vec<Vec<f64>> = from_js(points, "points")?;
    Ok(roadwidth_core::positions_to_path_string(&points))
}

/// Format the exterior of `{exterior: [{x, y}, ...]}` as an SVG `points` attribute.
#[wasm_bindgen(js_name = "polygonToPathString")]
pub fn polygon_to_path_string(polygon: JsValue) -> Result<String, JsValue> {
    let polygon: DisplayPolygon = from_js(polygon, "polygon")?;
    Ok(roadwidth_core::polygon_to_path_string(&polygon))
}

/// Turn `{start: {x, y}, end: {x, y}}` into `{x1, y1, x2, y2}`.
#[wasm_bindgen(js_name = "lineToPathEndpoints")]
pub fn line_to_path_endpoints(line: JsValue) -> Result<JsValue, JsValue> {
    let line: DisplayLine = from_js(line, "line")?;
    to_js(&roadwidth_core::line_to_path_endpoints(&line))
}

/// Copy a GeoJSON feature from map pixels into longitude/latitude.
#[wasm_bindgen(js_name = "projectToSpherical")]
pub fn project_to_spherical(frame: JsValue, feature: JsValue) -> Result<JsValue, JsValue> {
    let frame: MercatorFrame = from_js(frame, "mercator frame")?;
    let feature: Feature = from_js(feature, "feature")?;
    to_js(&roadwidth_core::project_to_spherical(&frame, &feature))
}

/// Copy a GeoJSON feature from longitude/latitude into map pixels.
#[wasm_bindgen(js_name = "projectToMercator")]
pub fn project_to_mercator(frame: JsValue, feature: JsValue) -> Result<JsValue, JsValue> {
    let frame: MercatorFrame = from_js(frame, "mercator frame")?;
    let feature: Feature = from_js(feature, "feature")?;
    to_js(&roadwidth_core::project_to_mercator(&frame, &feature))
}

/// Read the frame out of a map's rendered GeoJSON string.
#[wasm_bindgen(js_name = "mercatorFrame")]
pub fn mercator_frame(rendered: &str) -> Result<JsValue, JsValue> {
    let frame = MercatorFrame::from_geojson_str(rendered).map_err(js_err)?;
    to_js(&frame)
}
