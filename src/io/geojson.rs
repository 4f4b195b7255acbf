use anyhow::{anyhow, Context, Result};
use geojson::{FeatureCollection, JsonObject};

use crate::geom::MercatorFrame;

/// Foreign member of a rendered FeatureCollection that carries the map's frame.
const MERCATOR_MEMBER: &str = "mercator";

impl MercatorFrame {
    /// Read the frame a map model attached to its rendered FeatureCollection.
    pub fn from_feature_collection(collection: &FeatureCollection) -> Result<Self> {
        let value = collection.foreign_members.as_ref()
            .and_then(|members| members.get(MERCATOR_MEMBER))
            .ok_or_else(|| anyhow!("[io::geojson] FeatureCollection has no {MERCATOR_MEMBER:?} member"))?;

        let frame: MercatorFrame = serde_json::from_value(value.clone())
            .context("[io::geojson] Malformed mercator frame")?;

        frame.validate()
            .with_context(|| format!("[io::geojson] Unusable mercator frame {frame:?}"))?;

        Ok(frame)
    }

    /// Parse a rendered FeatureCollection and read its frame.
    pub fn from_geojson_str(geojson: &str) -> Result<Self> {
        let collection: FeatureCollection = serde_json::from_str(geojson)
            .context("[io::geojson] Failed to parse FeatureCollection")?;
        Self::from_feature_collection(&collection)
    }

    /// Foreign members to attach to a FeatureCollection so the UI can recover this frame.
    pub fn to_foreign_members(&self) -> Result<JsonObject> {
        let mut members = JsonObject::new();
        members.insert(MERCATOR_MEMBER.to_string(), serde_json::to_value(self)?);
        Ok(members)
    }
}
