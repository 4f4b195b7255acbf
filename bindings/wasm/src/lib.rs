use wasm_bindgen::prelude::*;

mod common;
mod geometry;
mod session;

pub use geometry::*;
pub use session::{WasmSession, WasmSubscription};

/// Called automatically when the WASM module is instantiated.
/// Sets up panic hook so Rust panics appear as console.error in the browser, and sends log
/// records to the console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        // Already initialized by an earlier instantiation
        log::debug!("console logger not installed: {e}");
    }
}
