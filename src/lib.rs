//! # html-pushpin
//!
//! Overlays arbitrary HTML markers ("pushpins") on top of a host map surface
//! and keeps their screen position in sync with the map viewport.
//!
//! The layer only needs two things from its host: a geographic-to-pixel
//! projection and a way to subscribe to view-change notifications. Both are
//! expressed by [`host::MapHost`]. A headless reference host ([`Map`]) is
//! included so the layer can be driven without a browser.

pub mod core;
pub mod host;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{MapOptions, PushpinLayerOptions},
    geo::{LatLng, LatLngBounds, Point},
    map::Map,
    viewport::Viewport,
};

pub use crate::host::{CustomOverlay, MapHost, PixelReference, SubscriptionId};

pub use crate::layers::{pushpin::HtmlPushpin, pushpin_layer::HtmlPushpinLayer};

pub use crate::input::{EventManager, MapEvent};

pub use crate::ui::element::HtmlElement;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Host error: {0}")]
    Host(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Registers the pushpin layer module with the host module registry.
///
/// Hosting applications call this once after initialization; repeated calls
/// are ignored.
pub fn register_module() {
    static REGISTERED: once_cell::sync::OnceCell<()> = once_cell::sync::OnceCell::new();
    REGISTERED.get_or_init(|| {
        host::modules::module_loaded(constants::MODULE_NAME);
    });
}

/// Initializes `env_logger` using `RUST_LOG`; safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_module_is_idempotent() {
        register_module();
        register_module();
        assert!(host::modules::is_module_loaded(constants::MODULE_NAME));
    }

    #[test]
    fn test_error_display() {
        let err = MapError::Layer("already attached".to_string());
        assert_eq!(err.to_string(), "Layer error: already attached");
    }
}
