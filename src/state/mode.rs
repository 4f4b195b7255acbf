use std::fmt;

use geojson::Feature;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the user is currently doing on the map. Exactly one mode is active at a time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Neutral,
    /// Inspecting the width available to one road.
    FindWidth { road: Feature },
    /// Building the polygon of one intersection.
    IntersectionPolygon { intersection: Feature },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    /// The value does not describe one of the known modes.
    InvalidMode(String),
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeError::InvalidMode(msg) => write!(f, "invalid mode: {msg}"),
        }
    }
}

impl std::error::Error for ModeError {}

impl Mode {
    pub const NAMES: [&'static str; 3] = ["neutral", "find-width", "intersection-polygon"];

    /// The tag this mode is serialized with.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Neutral => "neutral",
            Mode::FindWidth { .. } => "find-width",
            Mode::IntersectionPolygon { .. } => "intersection-polygon",
        }
    }

    /// The feature this mode acts on, if any.
    pub fn feature(&self) -> Option<&Feature> {
        match self {
            Mode::Neutral => None,
            Mode::FindWidth { road } => Some(road),
            Mode::IntersectionPolygon { intersection } => Some(intersection),
        }
    }

    #[inline] pub fn is_neutral(&self) -> bool { matches!(self, Mode::Neutral) }

    /// Build a mode from its JSON form, e.g. `{"mode": "find-width", "road": {...}}`.
    pub fn from_json(value: Value) -> Result<Self, ModeError> {
        let tag = value.get("mode")
            .and_then(Value::as_str)
            .ok_or_else(|| ModeError::InvalidMode("missing \"mode\" tag".to_string()))?;

        if !Self::NAMES.contains(&tag) {
            return Err(ModeError::InvalidMode(format!("unknown mode {tag:?}")));
        }
        let tag = tag.to_string();

        serde_json::from_value(value)
            .map_err(|e| ModeError::InvalidMode(format!("malformed {tag} payload: {e}")))
    }

    /// Parse a mode from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ModeError> {
        let value = serde_json::from_str(json)
            .map_err(|e| ModeError::InvalidMode(format!("not JSON: {e}")))?;
        Self::from_json(value)
    }
}
