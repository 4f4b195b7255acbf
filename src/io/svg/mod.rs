//! SVG attribute formatting for map overlays.

mod path;

pub use path::*;
