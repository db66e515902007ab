//! Prelude module for common html-pushpin types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use html_pushpin::prelude::*;`

pub use crate::core::{
    config::{MapOptions, PushpinLayerOptions},
    constants::VIEW_CHANGE_EVENT,
    geo::{LatLng, LatLngBounds, Point},
    map::Map,
    viewport::Viewport,
};

pub use crate::host::{CustomOverlay, MapHost, PixelReference, SubscriptionId};

pub use crate::layers::{
    manager::LayerManager, pushpin::HtmlPushpin, pushpin_layer::HtmlPushpinLayer,
};

pub use crate::input::{EventCallback, EventManager, MapEvent};

pub use crate::ui::element::{CssPosition, HtmlElement, Style};

pub use crate::{register_module, Error as MapError, Result};

pub use std::sync::Arc;
