//! Core constants shared by the layer and the headless host.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Name of the host notification fired whenever the visible map region changes.
pub const VIEW_CHANGE_EVENT: &str = "viewchange";

/// Name under which the pushpin layer registers itself with the module registry.
pub const MODULE_NAME: &str = "HtmlPushpinLayerModule";

/// Default square tile size in pixels, used by the Web Mercator projection.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Zoom range accepted by the headless viewport.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 21.0;

/// Default z-index for overlays that do not ask for one.
pub const DEFAULT_OVERLAY_Z_INDEX: i32 = 0;
