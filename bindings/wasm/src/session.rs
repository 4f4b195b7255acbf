use std::rc::Rc;

use js_sys::Function;
use roadwidth_core::geojson::Feature;
use roadwidth_core::{AppState, Mode, PanelContent, Store, Subscription};
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use crate::common::*;

/// Handle on the page's shared session state.
///
/// Exposes the mode, the selected feature and both panel slots. The current map is not exposed:
/// the map model lives in the JS shell, which keeps its own `currentMap` and calls `reset()` when
/// it unloads one.
#[wasm_bindgen]
pub struct WasmSession {
    inner: Rc<AppState>,
}

/// Keeps a JS callback subscribed until `unsubscribe()` or `free()` is called.
#[wasm_bindgen]
pub struct WasmSubscription {
    inner: Option<Subscription>,
}

#[wasm_bindgen]
impl WasmSubscription {
    pub fn unsubscribe(&mut self) {
        self.inner.take();
    }
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSession {
        WasmSession { inner: AppState::shared() }
    }

    /// Current mode as `{mode: "...", ...payload}`.
    pub fn mode(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.mode().get())
    }

    #[wasm_bindgen(js_name = "setMode")]
    pub fn set_mode(&self, mode: JsValue) -> Result<(), JsValue> {
        let value: serde_json::Value = from_js(mode, "mode")?;
        let mode = Mode::from_json(value).map_err(js_err)?;
        self.inner.set_mode(mode);
        Ok(())
    }

    /// Call `callback(mode)` now and after every mode change.
    #[wasm_bindgen(js_name = "subscribeMode")]
    pub fn subscribe_mode(&self, callback: Function) -> WasmSubscription {
        let sub = self.inner.mode().subscribe(move |mode: &Mode| {
            let result = to_js(mode).and_then(|value| callback.call1(&JsValue::NULL, &value));
            if let Err(e) = result {
                log::error!("mode subscriber failed: {e:?}");
            }
        });
        WasmSubscription { inner: Some(sub) }
    }

    /// The most recently clicked feature, or null.
    #[wasm_bindgen(js_name = "selectedFeature")]
    pub fn selected_feature(&self) -> Result<JsValue, JsValue> {
        match self.inner.selected_feature().get() {
            Some(feature) => to_js(&feature),
            None => Ok(JsValue::NULL),
        }
    }

    /// Pass null or undefined to clear the selection.
    #[wasm_bindgen(js_name = "setSelectedFeature")]
    pub fn set_selected_feature(&self, feature: JsValue) -> Result<(), JsValue> {
        let feature = if feature.is_null() || feature.is_undefined() {
            None
        } else {
            Some(from_js::<Feature>(feature, "feature")?)
        };
        self.inner.select_feature(feature);
        Ok(())
    }

    /// Whatever the page last placed in the sidebar, or null.
    #[wasm_bindgen(js_name = "sidebarContent")]
    pub fn sidebar_content(&self) -> JsValue {
        read_panel(self.inner.sidebar_content())
    }

    /// Pass null or undefined to empty the sidebar.
    #[wasm_bindgen(js_name = "setSidebarContent")]
    pub fn set_sidebar_content(&self, content: JsValue) {
        write_panel(self.inner.sidebar_content(), content);
    }

    /// Whatever the page last placed over the map, or null.
    #[wasm_bindgen(js_name = "mapOverlayContent")]
    pub fn map_overlay_content(&self) -> JsValue {
        read_panel(self.inner.map_overlay_content())
    }

    /// Pass null or undefined to remove the overlay.
    #[wasm_bindgen(js_name = "setMapOverlayContent")]
    pub fn set_map_overlay_content(&self, content: JsValue) {
        write_panel(self.inner.map_overlay_content(), content);
    }

    /// Restore every cell to its initial value, e.g. when the page unloads the map.
    pub fn reset(&self) {
        self.inner.reset();
    }
}

// Panel slots hold JS values as-is; anything else a Rust view stored reads back as null.
fn read_panel(slot: &Store<Option<PanelContent>>) -> JsValue {
    slot.with(|content| {
        content.as_ref()
            .and_then(|c| c.downcast_ref::<JsValue>())
            .cloned()
            .unwrap_or(JsValue::NULL)
    })
}

fn write_panel(slot: &Store<Option<PanelContent>>, content: JsValue) {
    let content = if content.is_null() || content.is_undefined() {
        None
    } else {
        Some(Rc::new(content) as PanelContent)
    };
    slot.set(content);
}
