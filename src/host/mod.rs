//! The contract between an overlay and the map control hosting it.
//!
//! [`MapHost`] is what the host provides (projection, event plumbing, a place
//! to install rendering containers). [`CustomOverlay`] is what an overlay
//! provides back: the lifecycle callbacks the host invokes as the overlay is
//! attached, loaded and removed.

pub mod modules;

use crate::{
    core::geo::{LatLng, LatLngBounds, Point},
    input::EventCallback,
    ui::element::HtmlElement,
    Result,
};
use std::sync::Weak;

/// Coordinate frame for [`MapHost::try_location_to_pixel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelReference {
    /// Relative to the top-left corner of the map control
    #[default]
    Control,
    /// Relative to the top-left corner of the page
    Page,
}

/// Handle to an event subscription registered with [`MapHost::add_handler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Capabilities a map control exposes to overlays
pub trait MapHost: Send + Sync {
    /// Installs an overlay's rendering container into the host's render tree
    fn attach_renderable(&self, overlay_id: &str, node: HtmlElement) -> Result<()>;

    /// Removes an overlay's rendering container; no-op when none is installed
    fn detach_renderable(&self, overlay_id: &str);

    /// Projects a location into pixels, `None` when it cannot be represented
    fn try_location_to_pixel(&self, location: &LatLng, reference: PixelReference)
        -> Option<Point>;

    /// Registers a handler for a named event
    fn add_handler(&self, event_name: &str, handler: EventCallback) -> SubscriptionId;

    /// Removes a handler, returning whether it was registered
    fn remove_handler(&self, id: SubscriptionId) -> bool;

    /// An overlay's stacking keys changed; re-sort it in the render order
    fn overlay_order_changed(&self, _overlay_id: &str) {}

    /// Smallest rectangle enclosing the locations
    fn bounds_from_locations(&self, locations: &[LatLng]) -> LatLngBounds {
        LatLngBounds::from_locations(locations)
    }
}

/// Lifecycle callbacks of an overlay registered with a host
pub trait CustomOverlay: Send + Sync {
    /// Unique id among the host's overlays
    fn id(&self) -> &str;

    /// Stacking order, lower draws first
    fn z_index(&self) -> i32 {
        crate::core::constants::DEFAULT_OVERLAY_Z_INDEX
    }

    /// Draw below the host's map labels
    fn beneath_labels(&self) -> bool {
        false
    }

    /// Overlay added to the host: create and install the rendering container
    fn on_add(&self, host: Weak<dyn MapHost>) -> Result<()>;

    /// Host finished attaching: wire up events and draw
    fn on_load(&self);

    /// Overlay removed: release host resources. Must be idempotent.
    fn on_remove(&self);

    /// Geographic extent of the overlay's content
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }
}
