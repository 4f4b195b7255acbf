//! Formats exchanged with the renderer and the map model.
//!
//! # Format Modules
//!
//! - `svg` - coordinate strings and endpoint records for SVG markup
//! - `geojson` - reading and writing the mercator frame carried by rendered maps
//!
//! Feature projection itself lives in `geom`, since it works on any GeoJSON feature.

pub(crate) mod geojson;
pub(crate) mod svg;
