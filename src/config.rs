//! Editor bounds and the startup configuration read from the host page.

use serde::Deserialize;

use crate::util::cwarn;

/// Width reserved for the settings panel when auto-fitting tiles.
pub const PANEL_WIDTH_PX: f64 = 220.0;
/// Height reserved for the header bar when auto-fitting tiles.
pub const HEADER_HEIGHT_PX: f64 = 60.0;

pub const AUTO_TILE_MIN_PX: f64 = 20.0;
pub const AUTO_TILE_MAX_PX: f64 = 120.0;
pub const MANUAL_TILE_MIN_PX: f64 = 20.0;
pub const MANUAL_TILE_MAX_PX: f64 = 200.0;
/// Pixels per millimetre for explicit tile sizes.
pub const MM_TO_PX: f64 = 0.08;

pub const MIN_SCALE: f64 = 0.2;
pub const MAX_SCALE: f64 = 4.0;
/// Relative scale change per wheel notch or zoom button press.
pub const ZOOM_STEP: f64 = 0.1;

/// Inset applied to each side of an invalid marker's rectangle.
pub const INVALID_MARKER_INSET_PX: f64 = 2.0;

pub const OCCUPIED_NOTICE: &str = "Cannot move here — tile already occupied!";
pub const FULL_NOTICE: &str = "Grid is full! Cannot add more components.";

const CONFIG_ELEMENT_ID: &str = "editor-config";

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    pub tile_width_mm: f64,
    pub tile_height_mm: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 12,
            tile_width_mm: 600.0,
            tile_height_mm: 600.0,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON document, keeping defaults for absent fields and
    /// repairing out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: EditorConfig = serde_json::from_str(raw)?;
        Ok(parsed.sanitized())
    }

    /// Read `<script id="editor-config" type="application/json">` from the page.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        let Some(raw) = raw else {
            return Self::default();
        };
        if raw.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&raw) {
            Ok(cfg) => cfg,
            Err(err) => {
                cwarn(&format!("editor-config ignored: {err}"));
                Self::default()
            }
        }
    }

    fn sanitized(self) -> Self {
        let d = Self::default();
        let mm = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        Self {
            grid_width: self.grid_width.max(1),
            grid_height: self.grid_height.max(1),
            tile_width_mm: mm(self.tile_width_mm, d.tile_width_mm),
            tile_height_mm: mm(self.tile_height_mm, d.tile_height_mm),
        }
    }
}
