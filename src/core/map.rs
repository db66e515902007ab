//! Headless map control implementing [`MapHost`].
//!
//! `Map` owns a [`Viewport`], an [`EventManager`] and the render tree of
//! installed overlay containers. It does no drawing: it exists so overlays can
//! be attached, driven and inspected without a browser.

use crate::{
    core::{
        config::MapOptions,
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    host::{CustomOverlay, MapHost, PixelReference, SubscriptionId},
    input::{EventCallback, EventManager, MapEvent},
    layers::manager::LayerManager,
    ui::element::HtmlElement,
    MapError, Result,
};
use fxhash::FxHashMap as HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

pub struct Map {
    self_ref: Weak<Map>,
    options: MapOptions,
    viewport: RwLock<Viewport>,
    events: EventManager,
    overlays: RwLock<LayerManager>,
    /// Installed rendering containers by overlay id
    render_tree: RwLock<HashMap<String, HtmlElement>>,
}

impl Map {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Arc<Self> {
        Self::build(center, zoom, size, MapOptions::default())
    }

    pub fn with_options(
        center: LatLng,
        zoom: f64,
        size: Point,
        options: MapOptions,
    ) -> Result<Arc<Self>> {
        options.validate()?;
        Ok(Self::build(center, zoom, size, options))
    }

    fn build(center: LatLng, zoom: f64, size: Point, options: MapOptions) -> Arc<Self> {
        let mut viewport = Viewport::new(center, zoom, size);
        viewport.set_zoom_limits(options.min_zoom, options.max_zoom);

        Arc::new_cyclic(|self_ref| Self {
            self_ref: self_ref.clone(),
            options,
            viewport: RwLock::new(viewport),
            events: EventManager::new(),
            overlays: RwLock::new(LayerManager::new()),
            render_tree: RwLock::new(HashMap::default()),
        })
    }

    fn viewport_mut(&self) -> RwLockWriteGuard<'_, Viewport> {
        self.viewport.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn overlays(&self) -> RwLockReadGuard<'_, LayerManager> {
        self.overlays.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn overlays_mut(&self) -> RwLockWriteGuard<'_, LayerManager> {
        self.overlays.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn render_tree(&self) -> RwLockReadGuard<'_, HashMap<String, HtmlElement>> {
        self.render_tree.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn render_tree_mut(&self) -> RwLockWriteGuard<'_, HashMap<String, HtmlElement>> {
        self.render_tree.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Adds an overlay and runs its attach and load callbacks
    pub fn add_overlay(&self, overlay: Arc<dyn CustomOverlay>) -> Result<()> {
        let id = overlay.id().to_string();
        if self.overlays().contains(&id) {
            return Err(MapError::Layer(format!("overlay {} already added", id)).into());
        }

        let host: Weak<dyn MapHost> = self.self_ref.clone();
        overlay.on_add(host)?;
        let registered = self.overlays_mut().add_overlay(Arc::clone(&overlay));
        if let Err(e) = registered {
            overlay.on_remove();
            return Err(e);
        }
        overlay.on_load();

        log::debug!("overlay {} added", id);
        self.events.emit(MapEvent::OverlayAdd { overlay_id: id });
        Ok(())
    }

    /// Removes an overlay and runs its remove callback
    pub fn remove_overlay(&self, overlay_id: &str) -> Option<Arc<dyn CustomOverlay>> {
        let overlay = self.overlays_mut().remove_overlay(overlay_id)?;
        overlay.on_remove();

        log::debug!("overlay {} removed", overlay_id);
        self.events.emit(MapEvent::OverlayRemove {
            overlay_id: overlay_id.to_string(),
        });
        Some(overlay)
    }

    pub fn overlay(&self, overlay_id: &str) -> Option<Arc<dyn CustomOverlay>> {
        self.overlays().get_overlay(overlay_id)
    }

    /// Overlay IDs in render order
    pub fn overlay_ids(&self) -> Vec<String> {
        self.overlays().render_order().to_vec()
    }

    /// Sets center and zoom
    pub fn set_view(&self, center: LatLng, zoom: f64) {
        {
            let mut viewport = self.viewport_mut();
            viewport.set_center(center);
            viewport.set_zoom(zoom);
        }
        self.emit_view_change();
    }

    /// Pans by a pixel offset; positive x moves the view east
    pub fn pan_by(&self, delta: Point) {
        self.viewport_mut().pan(delta);
        self.emit_view_change();
    }

    pub fn set_zoom(&self, zoom: f64) {
        self.viewport_mut().set_zoom(zoom);
        self.emit_view_change();
    }

    pub fn resize(&self, size: Point) {
        self.viewport_mut().set_size(size);
        self.emit_view_change();
    }

    fn emit_view_change(&self) {
        let viewport = self.viewport();
        self.events.emit(MapEvent::ViewChange {
            center: viewport.center,
            zoom: viewport.zoom,
            size: viewport.size,
        });
    }

    /// Delivers queued events to their handlers; returns how many were delivered
    pub fn update(&self) -> usize {
        self.events.process_events().len()
    }

    pub fn pending_events(&self) -> usize {
        self.events.pending_events()
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.events.listener_count(event_name)
    }

    /// Installed container of an overlay
    pub fn renderable(&self, overlay_id: &str) -> Option<HtmlElement> {
        self.render_tree().get(overlay_id).cloned()
    }

    /// HTML of every installed container, in render order
    pub fn render_html(&self) -> String {
        let order = self.overlay_ids();
        let tree = self.render_tree();
        order
            .iter()
            .filter_map(|id| tree.get(id))
            .map(HtmlElement::outer_html)
            .collect()
    }
}

impl MapHost for Map {
    fn attach_renderable(&self, overlay_id: &str, node: HtmlElement) -> Result<()> {
        let mut tree = self.render_tree_mut();
        if tree.contains_key(overlay_id) {
            return Err(MapError::Host(format!(
                "a container for {} is already installed",
                overlay_id
            ))
            .into());
        }
        tree.insert(overlay_id.to_string(), node);
        Ok(())
    }

    fn detach_renderable(&self, overlay_id: &str) {
        self.render_tree_mut().remove(overlay_id);
    }

    fn try_location_to_pixel(
        &self,
        location: &LatLng,
        reference: PixelReference,
    ) -> Option<Point> {
        if !location.is_valid() {
            return None;
        }
        let pixel = self.viewport().lat_lng_to_pixel(location);
        let pixel = match reference {
            PixelReference::Control => pixel,
            PixelReference::Page => pixel.add(&self.options.page_offset),
        };
        Some(pixel).filter(Point::is_finite)
    }

    fn add_handler(&self, event_name: &str, handler: EventCallback) -> SubscriptionId {
        self.events.on(event_name, handler)
    }

    fn remove_handler(&self, id: SubscriptionId) -> bool {
        self.events.off(id)
    }

    fn overlay_order_changed(&self, overlay_id: &str) {
        if self.overlays_mut().reorder(overlay_id) {
            log::debug!("overlay {} restacked", overlay_id);
        }
    }
}

impl std::fmt::Debug for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("viewport", &self.viewport())
            .field("overlays", &self.overlay_ids())
            .finish()
    }
}
