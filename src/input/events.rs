use crate::core::{
    constants::VIEW_CHANGE_EVENT,
    geo::{LatLng, Point},
};

/// Map event types that can be emitted by the map
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Map view has changed (center, zoom, or size)
    ViewChange { center: LatLng, zoom: f64, size: Point },
    /// Overlay was added to the map
    OverlayAdd { overlay_id: String },
    /// Overlay was removed from the map
    OverlayRemove { overlay_id: String },
}

impl MapEvent {
    /// Name handlers subscribe with
    pub fn event_name(&self) -> &'static str {
        match self {
            MapEvent::ViewChange { .. } => VIEW_CHANGE_EVENT,
            MapEvent::OverlayAdd { .. } => "overlayadd",
            MapEvent::OverlayRemove { .. } => "overlayremove",
        }
    }
}
