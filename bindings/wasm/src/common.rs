use serde::{Serialize, de::DeserializeOwned};
use wasm_bindgen::JsValue;

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Convert a plain JS object or array into a Rust value.
pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| js_err(format!("invalid {what}: {e}")))
}

/// Convert a Rust value into a plain JS object.
/// Goes through a JSON string so GeoJSON properties come out as objects rather than Maps.
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json_string = serde_json::to_string(value)
        .map_err(|e| js_err(format!("Failed to serialize to JSON: {e}")))?;
    js_sys::JSON::parse(&json_string)
        .map_err(|e| js_err(format!("Failed to parse JSON string: {e:?}")))
}
