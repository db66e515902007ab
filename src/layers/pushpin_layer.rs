//! Overlay layer that positions [`HtmlPushpin`]s over a host map.
//!
//! The layer owns a rendering container, appends each pin's element to it and
//! rewrites every element's `left`/`top` whenever the host reports a view
//! change. Positions are the host projection of the pin location, in the
//! control's pixel frame, minus the pin anchor.

use crate::{
    core::{
        config::PushpinLayerOptions,
        constants::VIEW_CHANGE_EVENT,
        geo::{LatLng, LatLngBounds},
    },
    host::{CustomOverlay, MapHost, PixelReference, SubscriptionId},
    layers::pushpin::HtmlPushpin,
    ui::element::{HtmlElement, Style},
    MapError, Result,
};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

#[derive(Default)]
struct LayerState {
    /// Insertion order is z-order
    pins: Vec<HtmlPushpin>,
    /// Present while attached
    container: Option<HtmlElement>,
    host: Option<Weak<dyn MapHost>>,
    /// Present while attached and loaded
    subscription: Option<SubscriptionId>,
}

impl LayerState {
    fn live_host(&self) -> Option<Arc<dyn MapHost>> {
        self.host.as_ref().and_then(Weak::upgrade)
    }

    fn contains(&self, pin: &HtmlPushpin) -> bool {
        self.pins.iter().any(|p| p.ptr_eq(pin))
    }
}

/// A reusable layer for overlaying HTML elements as pushpins on a map
pub struct HtmlPushpinLayer {
    id: String,
    self_ref: Weak<HtmlPushpinLayer>,
    options: RwLock<PushpinLayerOptions>,
    state: RwLock<LayerState>,
}

impl HtmlPushpinLayer {
    pub fn new(id: impl Into<String>) -> Arc<Self> {
        Self::with_options(id, PushpinLayerOptions::default())
    }

    pub fn with_options(id: impl Into<String>, options: PushpinLayerOptions) -> Arc<Self> {
        let id = id.into();
        Arc::new_cyclic(|self_ref| Self {
            id,
            self_ref: self_ref.clone(),
            options: RwLock::new(options),
            state: RwLock::new(LayerState::default()),
        })
    }

    /// Creates a layer that already manages `pins`
    pub fn with_pushpins<I>(id: impl Into<String>, pins: I) -> Arc<Self>
    where
        I: IntoIterator<Item = HtmlPushpin>,
    {
        let layer = Self::new(id);
        layer.add_all(pins);
        layer
    }

    fn read_state(&self) -> RwLockReadGuard<'_, LayerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, LayerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options(&self) -> PushpinLayerOptions {
        self.options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merges a JSON object into the current options.
    ///
    /// While attached, a change to `z_index` or `beneath_labels` asks the host
    /// to restack the layer.
    pub fn set_options(&self, patch: serde_json::Value) -> Result<()> {
        let serde_json::Value::Object(patch) = patch else {
            return Err(MapError::Config("layer options must be a JSON object".to_string()).into());
        };

        let mut merged = self.options().to_json();
        if let serde_json::Value::Object(current) = &mut merged {
            current.extend(patch);
        }
        let new_options = PushpinLayerOptions::from_json(merged)?;

        let old_options = std::mem::replace(
            &mut *self.options.write().unwrap_or_else(PoisonError::into_inner),
            new_options.clone(),
        );

        let host = {
            let state = self.read_state();
            if let Some(container) = &state.container {
                container.update_style(|style| style.hidden = !new_options.visible);
            }
            state.live_host()
        };

        let restack = old_options.z_index != new_options.z_index
            || old_options.beneath_labels != new_options.beneath_labels;
        if let (true, Some(host)) = (restack, host) {
            host.overlay_order_changed(&self.id);
        }

        self.update_positions();
        Ok(())
    }

    /// Shows or hides the rendering container
    pub fn set_visible(&self, visible: bool) {
        self.options
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .visible = visible;
        if let Some(container) = &self.read_state().container {
            container.update_style(|style| style.hidden = !visible);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.options().visible
    }

    /// Adds a pin to the end of the layer
    pub fn add(&self, pin: HtmlPushpin) {
        self.add_all(std::iter::once(pin));
    }

    /// Adds pins to the end of the layer, in order.
    ///
    /// A pin managed by another layer is removed from it first. A pin already
    /// in this layer keeps its place. Empty input is a no-op.
    pub fn add_all<I>(&self, pins: I)
    where
        I: IntoIterator<Item = HtmlPushpin>,
    {
        let pins: Vec<HtmlPushpin> = pins.into_iter().collect();
        if pins.is_empty() {
            return;
        }
        self.detach_from_other_layers(&pins);

        let mut state = self.write_state();
        for pin in pins {
            self.insert_locked(&mut state, pin);
        }
        self.update_positions_locked(&state);
    }

    /// Removes one pin, returning whether it was in the layer
    pub fn remove(&self, pin: &HtmlPushpin) -> bool {
        let mut state = self.write_state();
        let Some(index) = state.pins.iter().position(|p| p.ptr_eq(pin)) else {
            return false;
        };

        let removed = state.pins.remove(index);
        removed.clear_layer();
        if let Some(container) = &state.container {
            container.remove_child(removed.element());
        }
        true
    }

    /// Removes every pin. Pins keep their content and last position.
    pub fn clear(&self) {
        let mut state = self.write_state();
        Self::clear_locked(&mut state);
    }

    /// Replaces every pin with `pins`
    pub fn set_pins<I>(&self, pins: I)
    where
        I: IntoIterator<Item = HtmlPushpin>,
    {
        let pins: Vec<HtmlPushpin> = pins.into_iter().collect();
        self.detach_from_other_layers(&pins);

        let mut state = self.write_state();
        Self::clear_locked(&mut state);
        for pin in pins {
            self.insert_locked(&mut state, pin);
        }
        self.update_positions_locked(&state);
    }

    /// Snapshot of the pins in z-order
    pub fn pushpins(&self) -> Vec<HtmlPushpin> {
        self.read_state().pins.clone()
    }

    pub fn len(&self) -> usize {
        self.read_state().pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_state().pins.is_empty()
    }

    /// Smallest box enclosing every pin location, [`LatLngBounds::empty`]
    /// when the layer has no pins
    pub fn bounds(&self) -> LatLngBounds {
        let state = self.read_state();
        let locations: Vec<LatLng> = state.pins.iter().map(HtmlPushpin::location).collect();
        match state.live_host() {
            Some(host) => host.bounds_from_locations(&locations),
            None => LatLngBounds::from_locations(&locations),
        }
    }

    /// Attached to a host that is still alive
    pub fn is_attached(&self) -> bool {
        let state = self.read_state();
        state.container.is_some() && state.live_host().is_some()
    }

    /// Attached to a live host and subscribed to view changes
    pub fn is_loaded(&self) -> bool {
        let state = self.read_state();
        state.subscription.is_some() && state.live_host().is_some()
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.read_state().subscription
    }

    /// The rendering container, present while attached
    pub fn container(&self) -> Option<HtmlElement> {
        self.read_state().container.clone()
    }

    /// Recomputes the screen position of every pin.
    ///
    /// No-op while detached; pins whose location the host cannot project are
    /// left where they are.
    pub fn update_positions(&self) {
        let state = self.read_state();
        self.update_positions_locked(&state);
    }

    fn update_positions_locked(&self, state: &LayerState) {
        let Some(host) = state.live_host() else {
            return;
        };
        if state.container.is_none() {
            return;
        }
        let round = self.options().round_to_pixels;

        for pin in &state.pins {
            let location = pin.location();
            let Some(pixel) = host
                .try_location_to_pixel(&location, PixelReference::Control)
                .filter(|pixel| pixel.is_finite())
            else {
                log::debug!(
                    "layer {}: cannot project pin at ({}, {}), skipping",
                    self.id,
                    location.lat,
                    location.lng
                );
                continue;
            };

            let mut top_left = pixel.subtract(&pin.anchor());
            if round {
                top_left = top_left.round();
            }
            pin.element().set_offset(top_left.x, top_left.y);
        }
        log::trace!("layer {}: positioned {} pins", self.id, state.pins.len());
    }

    fn insert_locked(&self, state: &mut LayerState, pin: HtmlPushpin) {
        if state.contains(&pin) {
            return;
        }
        pin.set_layer(self.self_ref.clone());
        if let Some(container) = &state.container {
            container.append_child(pin.element());
        }
        state.pins.push(pin);
    }

    fn clear_locked(state: &mut LayerState) {
        for pin in state.pins.drain(..) {
            pin.clear_layer();
        }
        if let Some(container) = &state.container {
            container.clear();
        }
    }

    /// Takes pins away from any other layer that manages them
    fn detach_from_other_layers(&self, pins: &[HtmlPushpin]) {
        for pin in pins {
            if let Some(owner) = pin.layer() {
                if !std::ptr::eq(Arc::as_ptr(&owner), self) {
                    log::debug!("moving pin from layer {} to {}", owner.id(), self.id);
                    owner.remove(pin);
                }
            }
        }
    }

    fn subscribe_locked(&self, state: &mut LayerState, host: &dyn MapHost) {
        let layer = self.self_ref.clone();
        let id = host.add_handler(
            VIEW_CHANGE_EVENT,
            Arc::new(move |_event: &crate::input::MapEvent| {
                if let Some(layer) = layer.upgrade() {
                    layer.update_positions();
                }
            }),
        );
        log::debug!("layer {}: subscribed to {} ({})", self.id, VIEW_CHANGE_EVENT, id);
        state.subscription = Some(id);
    }
}

impl CustomOverlay for HtmlPushpinLayer {
    fn id(&self) -> &str {
        &self.id
    }

    fn z_index(&self) -> i32 {
        self.options().z_index
    }

    fn beneath_labels(&self) -> bool {
        self.options().beneath_labels
    }

    fn on_add(&self, host: Weak<dyn MapHost>) -> Result<()> {
        let mut state = self.write_state();
        if state.container.is_some() {
            return Err(MapError::Layer(format!("layer {} is already attached", self.id)).into());
        }
        let live = host
            .upgrade()
            .ok_or_else(|| MapError::Host("host dropped before layer attach".to_string()))?;

        let container = HtmlElement::div().with_style(Style::absolute_at(0.0, 0.0));
        container.update_style(|style| style.hidden = !self.is_visible());
        live.attach_renderable(&self.id, container.clone())?;

        state.container = Some(container);
        state.host = Some(host);
        log::debug!("layer {}: attached", self.id);
        Ok(())
    }

    fn on_load(&self) {
        let pins = self.pushpins();
        self.set_pins(pins);

        let mut state = self.write_state();
        if state.subscription.is_some() {
            return;
        }
        let Some(host) = state.live_host() else {
            log::warn!("layer {}: loaded without a live host", self.id);
            return;
        };
        self.subscribe_locked(&mut state, host.as_ref());
    }

    fn on_remove(&self) {
        let mut state = self.write_state();
        let subscription = state.subscription.take();
        if let Some(host) = state.host.take().as_ref().and_then(Weak::upgrade) {
            if let Some(id) = subscription {
                host.remove_handler(id);
            }
            host.detach_renderable(&self.id);
        }
        state.container = None;
        log::debug!("layer {}: removed", self.id);
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(HtmlPushpinLayer::bounds(self)).filter(|bounds| !bounds.is_empty())
    }
}

impl std::fmt::Debug for HtmlPushpinLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read_state();
        f.debug_struct("HtmlPushpinLayer")
            .field("id", &self.id)
            .field("pins", &state.pins.len())
            .field("attached", &state.container.is_some())
            .field("subscription", &state.subscription)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::Point, input::EventCallback, input::EventManager};
    use fxhash::FxHashMap;
    use std::sync::Mutex;

    /// Host with a fixed location -> pixel table
    #[derive(Default)]
    struct TableHost {
        projections: Mutex<Vec<(LatLng, Point)>>,
        events: EventManager,
        installed: Mutex<FxHashMap<String, HtmlElement>>,
        restacked: Mutex<Vec<String>>,
    }

    impl TableHost {
        fn project_to(&self, location: LatLng, pixel: Point) {
            self.projections.lock().unwrap().push((location, pixel));
        }
    }

    impl MapHost for TableHost {
        fn attach_renderable(&self, overlay_id: &str, node: HtmlElement) -> Result<()> {
            self.installed
                .lock()
                .unwrap()
                .insert(overlay_id.to_string(), node);
            Ok(())
        }

        fn detach_renderable(&self, overlay_id: &str) {
            self.installed.lock().unwrap().remove(overlay_id);
        }

        fn try_location_to_pixel(&self, location: &LatLng, _: PixelReference) -> Option<Point> {
            self.projections
                .lock()
                .unwrap()
                .iter()
                .find(|(loc, _)| loc == location)
                .map(|(_, pixel)| *pixel)
        }

        fn add_handler(&self, event_name: &str, handler: EventCallback) -> SubscriptionId {
            self.events.on(event_name, handler)
        }

        fn remove_handler(&self, id: SubscriptionId) -> bool {
            self.events.off(id)
        }

        fn overlay_order_changed(&self, overlay_id: &str) {
            self.restacked.lock().unwrap().push(overlay_id.to_string());
        }
    }

    fn attach(layer: &Arc<HtmlPushpinLayer>, host: &Arc<TableHost>) {
        let weak: Weak<dyn MapHost> = Arc::downgrade(host) as Weak<dyn MapHost>;
        layer.on_add(weak).unwrap();
        layer.on_load();
    }

    fn pin_at(lat: f64, lng: f64) -> HtmlPushpin {
        HtmlPushpin::new(LatLng::new(lat, lng), "<b>pin</b>", Point::new(0.0, 0.0))
    }

    #[test]
    fn test_add_preserves_order_and_sets_back_reference() {
        let layer = HtmlPushpinLayer::new("pins");
        let pins = vec![pin_at(1.0, 1.0), pin_at(2.0, 2.0), pin_at(3.0, 3.0)];

        layer.add(pins[0].clone());
        layer.add_all(pins[1..].to_vec());

        assert_eq!(layer.pushpins(), pins);
        for pin in &pins {
            assert!(pin.is_in_layer(&layer));
            assert_eq!(pin.layer_id().as_deref(), Some("pins"));
        }
    }

    #[test]
    fn test_absent_input_is_noop() {
        let layer = HtmlPushpinLayer::new("pins");
        layer.add_all(None::<HtmlPushpin>);
        layer.add_all(Vec::new());
        assert!(layer.is_empty());
    }

    #[test]
    fn test_clear_resets_back_references_and_is_idempotent() {
        let layer = HtmlPushpinLayer::new("pins");
        let pins = vec![pin_at(1.0, 1.0), pin_at(2.0, 2.0)];
        layer.add_all(pins.clone());

        layer.clear();
        assert!(layer.pushpins().is_empty());
        assert!(pins.iter().all(|pin| pin.layer_id().is_none()));

        layer.clear();
        assert!(layer.pushpins().is_empty());
    }

    #[test]
    fn test_set_pins_matches_clear_then_add() {
        let old = vec![pin_at(0.0, 0.0)];
        let new = vec![pin_at(1.0, 1.0), pin_at(2.0, 2.0)];

        let replaced = HtmlPushpinLayer::with_pushpins("a", old.clone());
        replaced.set_pins(new.clone());
        assert_eq!(replaced.pushpins(), new);
        assert!(old[0].layer_id().is_none());

        replaced.set_pins(None::<HtmlPushpin>);
        assert!(replaced.is_empty());
    }

    #[test]
    fn test_set_pins_with_own_pins_keeps_them() {
        let pins = vec![pin_at(1.0, 1.0), pin_at(2.0, 2.0)];
        let layer = HtmlPushpinLayer::with_pushpins("a", pins.clone());

        layer.set_pins(layer.pushpins());
        assert_eq!(layer.pushpins(), pins);
        assert!(pins.iter().all(|pin| pin.is_in_layer(&layer)));
    }

    #[test]
    fn test_duplicate_add_ignored() {
        let layer = HtmlPushpinLayer::new("pins");
        let pin = pin_at(1.0, 1.0);
        layer.add(pin.clone());
        layer.add(pin.clone());
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_remove() {
        let layer = HtmlPushpinLayer::new("pins");
        let pin = pin_at(1.0, 1.0);
        layer.add(pin.clone());

        assert!(layer.remove(&pin));
        assert!(!layer.remove(&pin));
        assert!(pin.layer_id().is_none());
    }

    #[test]
    fn test_adding_to_second_layer_moves_pin() {
        let host = Arc::new(TableHost::default());
        let first = HtmlPushpinLayer::new("first");
        let second = HtmlPushpinLayer::new("second");
        attach(&first, &host);
        attach(&second, &host);

        let pin = pin_at(1.0, 1.0);
        first.add(pin.clone());
        second.add(pin.clone());

        assert!(first.is_empty());
        assert_eq!(second.pushpins(), vec![pin.clone()]);
        assert!(pin.is_in_layer(&second));
        assert!(!first.container().unwrap().contains_child(pin.element()));
        assert!(second.container().unwrap().contains_child(pin.element()));
    }

    #[test]
    fn test_position_subtracts_anchor() {
        let host = Arc::new(TableHost::default());
        let location = LatLng::new(10.0, 10.0);
        host.project_to(location, Point::new(100.0, 100.0));

        let layer = HtmlPushpinLayer::new("pins");
        attach(&layer, &host);

        let pin = HtmlPushpin::new(location, "<b>pin</b>", Point::new(10.0, 20.0));
        layer.add(pin.clone());

        assert_eq!(pin.position(), Some(Point::new(90.0, 80.0)));
    }

    #[test]
    fn test_unprojectable_pin_skipped() {
        let host = Arc::new(TableHost::default());
        let good = LatLng::new(1.0, 1.0);
        host.project_to(good, Point::new(50.0, 60.0));

        let layer = HtmlPushpinLayer::new("pins");
        attach(&layer, &host);

        let bad_pin = pin_at(89.0, 0.0);
        let good_pin = HtmlPushpin::new(good, "ok", Point::new(5.0, 5.0));
        layer.add_all(vec![bad_pin.clone(), good_pin.clone()]);

        assert!(bad_pin.position().is_none());
        assert_eq!(good_pin.position(), Some(Point::new(45.0, 55.0)));
    }

    #[test]
    fn test_detached_operations_are_safe() {
        let layer = HtmlPushpinLayer::new("pins");
        let pin = pin_at(1.0, 1.0);

        layer.add(pin.clone());
        layer.set_pins(vec![pin.clone()]);
        assert_eq!(layer.bounds(), LatLngBounds::from_locations(&[pin.location()]));
        layer.update_positions();
        assert!(pin.position().is_none());
        layer.clear();
        assert!(layer.bounds().is_empty());
        assert!(!layer.is_attached());
    }

    #[test]
    fn test_positions_computed_on_load_for_existing_pins() {
        let host = Arc::new(TableHost::default());
        let location = LatLng::new(3.0, 4.0);
        host.project_to(location, Point::new(30.0, 40.0));

        let pin = HtmlPushpin::new(location, "x", Point::new(0.0, 0.0));
        let layer = HtmlPushpinLayer::with_pushpins("pins", vec![pin.clone()]);
        attach(&layer, &host);

        assert_eq!(pin.position(), Some(Point::new(30.0, 40.0)));
        assert!(layer.container().unwrap().contains_child(pin.element()));
    }

    #[test]
    fn test_view_change_repositions() {
        let host = Arc::new(TableHost::default());
        let location = LatLng::new(3.0, 4.0);
        host.project_to(location, Point::new(30.0, 40.0));

        let pin = HtmlPushpin::new(location, "x", Point::new(0.0, 0.0));
        let layer = HtmlPushpinLayer::with_pushpins("pins", vec![pin.clone()]);
        attach(&layer, &host);

        let moved = LatLng::new(5.0, 6.0);
        host.project_to(moved, Point::new(7.0, 8.0));
        pin.set_location(moved);
        assert_eq!(pin.position(), Some(Point::new(30.0, 40.0)));

        host.events.dispatch(&crate::input::MapEvent::ViewChange {
            center: LatLng::new(0.0, 0.0),
            zoom: 1.0,
            size: Point::new(100.0, 100.0),
        });
        assert_eq!(pin.position(), Some(Point::new(7.0, 8.0)));
    }

    #[test]
    fn test_remove_and_reattach_keeps_single_subscription() {
        let host = Arc::new(TableHost::default());
        let layer = HtmlPushpinLayer::new("pins");

        attach(&layer, &host);
        layer.on_load();
        assert_eq!(host.events.listener_count("viewchange"), 1);

        layer.on_remove();
        layer.on_remove();
        assert_eq!(host.events.listener_count("viewchange"), 0);
        assert!(host.installed.lock().unwrap().is_empty());
        assert!(!layer.is_loaded());

        attach(&layer, &host);
        assert_eq!(host.events.listener_count("viewchange"), 1);
        assert_eq!(host.installed.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_double_attach_rejected() {
        let host = Arc::new(TableHost::default());
        let layer = HtmlPushpinLayer::new("pins");
        attach(&layer, &host);

        let weak: Weak<dyn MapHost> = Arc::downgrade(&host) as Weak<dyn MapHost>;
        assert!(layer.on_add(weak).is_err());
    }

    #[test]
    fn test_remove_without_load_is_safe() {
        let layer = HtmlPushpinLayer::new("pins");
        layer.on_remove();
        assert!(!layer.is_attached());
    }

    #[test]
    fn test_dropped_host_skips_positioning() {
        let host = Arc::new(TableHost::default());
        let location = LatLng::new(1.0, 1.0);
        host.project_to(location, Point::new(1.0, 1.0));
        let layer = HtmlPushpinLayer::new("pins");
        attach(&layer, &host);
        drop(host);

        let pin = HtmlPushpin::new(location, "x", Point::new(0.0, 0.0));
        layer.add(pin.clone());
        assert!(pin.position().is_none());
        assert!(!layer.is_attached());
        assert!(!layer.is_loaded());
    }

    #[test]
    fn test_set_options_updates_visibility_and_keeps_subscription() {
        let host = Arc::new(TableHost::default());
        let layer = HtmlPushpinLayer::new("pins");
        attach(&layer, &host);
        let subscription = layer.subscription();

        layer
            .set_options(serde_json::json!({ "visible": false, "round_to_pixels": true }))
            .unwrap();

        assert!(layer.container().unwrap().style().hidden);
        assert!(layer.options().round_to_pixels);
        assert_eq!(layer.subscription(), subscription);
        assert_eq!(host.events.listener_count("viewchange"), 1);
        assert!(layer.set_options(serde_json::json!([1, 2])).is_err());
    }

    #[test]
    fn test_stacking_change_notifies_host() {
        let host = Arc::new(TableHost::default());
        let layer = HtmlPushpinLayer::new("pins");

        layer.set_options(serde_json::json!({ "z_index": 3 })).unwrap();
        assert!(host.restacked.lock().unwrap().is_empty());

        attach(&layer, &host);
        layer.set_options(serde_json::json!({ "visible": false })).unwrap();
        assert!(host.restacked.lock().unwrap().is_empty());

        layer.set_options(serde_json::json!({ "z_index": 4 })).unwrap();
        layer.set_options(serde_json::json!({ "beneath_labels": true })).unwrap();
        assert_eq!(*host.restacked.lock().unwrap(), ["pins", "pins"]);
        assert!(CustomOverlay::beneath_labels(layer.as_ref()));
        assert_eq!(CustomOverlay::z_index(layer.as_ref()), 4);
    }

    #[test]
    fn test_round_to_pixels() {
        let host = Arc::new(TableHost::default());
        let location = LatLng::new(1.0, 1.0);
        host.project_to(location, Point::new(10.4, 20.6));

        let options = PushpinLayerOptions {
            round_to_pixels: true,
            ..Default::default()
        };
        let layer = HtmlPushpinLayer::with_options("pins", options);
        attach(&layer, &host);

        let pin = HtmlPushpin::new(location, "x", Point::new(0.0, 0.0));
        layer.add(pin.clone());
        assert_eq!(pin.position(), Some(Point::new(10.0, 21.0)));
    }
}
