//! Configuration for the pushpin layer and the headless host
//!
//! Both option structs deserialize from JSON with every field optional, so
//! callers only spell out what differs from the defaults.

use crate::{
    core::{
        constants::{DEFAULT_OVERLAY_Z_INDEX, MAX_ZOOM, MIN_ZOOM},
        geo::Point,
    },
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Options for an [`HtmlPushpinLayer`](crate::layers::pushpin_layer::HtmlPushpinLayer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushpinLayerOptions {
    /// Stacking order among the host's overlays, lower draws first
    pub z_index: i32,
    /// Whether the rendering container is displayed
    pub visible: bool,
    /// Draw in the band below the map labels. Every overlay in that band
    /// renders before any overlay above the labels, whatever its z-index.
    pub beneath_labels: bool,
    /// Snap written positions to whole pixels
    pub round_to_pixels: bool,
}

impl Default for PushpinLayerOptions {
    fn default() -> Self {
        Self {
            z_index: DEFAULT_OVERLAY_Z_INDEX,
            visible: true,
            beneath_labels: false,
            round_to_pixels: false,
        }
    }
}

impl PushpinLayerOptions {
    /// Parses options from a JSON value, filling gaps with defaults
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let options: Self = serde_json::from_value(value).map_err(MapError::from)?;
        Ok(options)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Options for the headless [`Map`](crate::core::map::Map) host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Offset of the map control inside the page, used for
    /// [`PixelReference::Page`](crate::host::PixelReference::Page)
    pub page_offset: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            page_offset: Point::new(0.0, 0.0),
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl MapOptions {
    pub fn validate(&self) -> Result<()> {
        if self.min_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            ))
            .into());
        }
        Ok(())
    }
}
