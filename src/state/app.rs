use std::any::Any;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use geojson::Feature;

use crate::geom::MercatorFrame;
use crate::state::{Mode, Store};

/// The map loaded from OSM input, owned by the mapping runtime.
pub trait MapModel {
    /// Render the map as a GeoJSON FeatureCollection whose `"mercator"` foreign member holds
    /// the frame its features were projected with.
    fn render(&self) -> Result<String>;
}

/// Opaque content placed into a panel slot. Views downcast it to whatever they put there.
pub type PanelContent = Rc<dyn Any>;

/// Session-wide UI state. Every field is an independent observable cell.
pub struct AppState {
    current_map: Store<Option<Rc<dyn MapModel>>>,
    mode: Store<Mode>,
    selected_feature: Store<Option<Feature>>,
    sidebar_content: Store<Option<PanelContent>>,
    map_overlay_content: Store<Option<PanelContent>>,
}

thread_local! {
    static SHARED_STATE: Rc<AppState> = Rc::new(AppState::new());
}

impl Default for AppState {
    fn default() -> Self { Self::new() }
}

impl AppState {
    /// Fresh state: no map, neutral mode, nothing selected, empty panels.
    pub fn new() -> Self {
        Self {
            current_map: Store::new(None),
            mode: Store::new(Mode::Neutral),
            selected_feature: Store::new(None),
            sidebar_content: Store::new(None),
            map_overlay_content: Store::new(None),
        }
    }

    /// The state shared by every view on this (UI) thread, created on first use.
    pub fn shared() -> Rc<Self> {
        SHARED_STATE.with(Rc::clone)
    }

    #[inline] pub fn current_map(&self) -> &Store<Option<Rc<dyn MapModel>>> { &self.current_map }
    #[inline] pub fn mode(&self) -> &Store<Mode> { &self.mode }
    #[inline] pub fn selected_feature(&self) -> &Store<Option<Feature>> { &self.selected_feature }
    #[inline] pub fn sidebar_content(&self) -> &Store<Option<PanelContent>> { &self.sidebar_content }
    #[inline] pub fn map_overlay_content(&self) -> &Store<Option<PanelContent>> { &self.map_overlay_content }

    pub fn load_map(&self, map: Rc<dyn MapModel>) {
        log::debug!("[state::app] map loaded");
        self.current_map.set(Some(map));
    }

    pub fn unload_map(&self) {
        log::debug!("[state::app] map unloaded");
        self.current_map.set(None);
    }

    /// Switch to another mode, replacing the previous one entirely.
    pub fn set_mode(&self, mode: Mode) {
        log::debug!("[state::app] mode {} -> {}", self.mode.with(Mode::name), mode.name());
        self.mode.set(mode);
    }

    pub fn select_feature(&self, feature: Option<Feature>) {
        self.selected_feature.set(feature);
    }

    /// Put every cell back to its initial value. Subscribers stay registered and are notified.
    pub fn reset(&self) {
        self.current_map.set(None);
        self.mode.set(Mode::Neutral);
        self.selected_feature.set(None);
        self.sidebar_content.set(None);
        self.map_overlay_content.set(None);
    }

    /// The frame of the currently loaded map, read from a fresh render.
    pub fn mercator_frame(&self) -> Result<MercatorFrame> {
        let map = self.current_map.get()
            .ok_or_else(|| anyhow!("[state::app] No map is loaded"))?;
        let rendered = map.render()
            .context("[state::app] Failed to render the current map")?;
        MercatorFrame::from_geojson_str(&rendered)
    }
}
