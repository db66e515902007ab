use crate::{
    core::geo::{LatLng, Point},
    layers::pushpin_layer::HtmlPushpinLayer,
    ui::element::{HtmlElement, Style},
};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

#[derive(Debug)]
struct PinState {
    location: LatLng,
    anchor: Point,
    metadata: Option<serde_json::Value>,
    /// Set and cleared by the owning layer only
    layer: Weak<HtmlPushpinLayer>,
}

/// A point marker rendered as arbitrary HTML, anchored to a location.
///
/// `HtmlPushpin` is a handle: clones refer to the same pin. Setting the
/// location or anchor does not redraw anything; the owning layer repositions
/// its pins on its next pass.
#[derive(Debug, Clone)]
pub struct HtmlPushpin {
    state: Arc<RwLock<PinState>>,
    content: Arc<str>,
    element: HtmlElement,
}

impl HtmlPushpin {
    /// Creates a pin.
    ///
    /// `anchor` is the offset in pixels from the top-left corner of the
    /// rendered content to the point that should sit on `location`.
    pub fn new(location: LatLng, html: impl Into<String>, anchor: Point) -> Self {
        let html: String = html.into();
        let element = HtmlElement::div()
            .with_inner_html(html.clone())
            .with_style(Style {
                position: crate::ui::element::CssPosition::Absolute,
                ..Style::default()
            });

        Self {
            state: Arc::new(RwLock::new(PinState {
                location,
                anchor,
                metadata: None,
                layer: Weak::new(),
            })),
            content: Arc::from(html),
            element,
        }
    }

    pub fn with_metadata(self, metadata: serde_json::Value) -> Self {
        self.set_metadata(Some(metadata));
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, PinState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PinState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn location(&self) -> LatLng {
        self.read().location
    }

    pub fn set_location(&self, location: LatLng) {
        self.write().location = location;
    }

    pub fn anchor(&self) -> Point {
        self.read().anchor
    }

    pub fn set_anchor(&self, anchor: Point) {
        self.write().anchor = anchor;
    }

    /// The HTML the pin was created with
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metadata(&self) -> Option<serde_json::Value> {
        self.read().metadata.clone()
    }

    pub fn set_metadata(&self, metadata: Option<serde_json::Value>) {
        self.write().metadata = metadata;
    }

    /// The pin's visual node
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Last position written by a layer, relative to the layer's container
    pub fn position(&self) -> Option<Point> {
        let style = self.element.style();
        Some(Point::new(style.left?, style.top?))
    }

    /// Id of the layer currently managing this pin
    pub fn layer_id(&self) -> Option<String> {
        self.layer().map(|layer| layer.id().to_string())
    }

    pub fn is_in_layer(&self, layer: &HtmlPushpinLayer) -> bool {
        std::ptr::eq(self.read().layer.as_ptr(), layer)
    }

    /// True when both handles refer to the same pin
    pub fn ptr_eq(&self, other: &HtmlPushpin) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    pub(crate) fn layer(&self) -> Option<Arc<HtmlPushpinLayer>> {
        self.read().layer.upgrade()
    }

    pub(crate) fn set_layer(&self, layer: Weak<HtmlPushpinLayer>) {
        self.write().layer = layer;
    }

    pub(crate) fn clear_layer(&self) {
        self.write().layer = Weak::new();
    }
}

impl PartialEq for HtmlPushpin {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for HtmlPushpin {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin() -> HtmlPushpin {
        HtmlPushpin::new(
            LatLng::new(47.6, -122.3),
            "<div class=\"pin\">A</div>",
            Point::new(10.0, 20.0),
        )
    }

    #[test]
    fn test_accessors() {
        let pin = pin();
        assert_eq!(pin.location(), LatLng::new(47.6, -122.3));
        assert_eq!(pin.anchor(), Point::new(10.0, 20.0));
        assert_eq!(pin.content(), "<div class=\"pin\">A</div>");
        assert_eq!(pin.element().inner_html(), pin.content());
        assert!(pin.metadata().is_none());
        assert!(pin.layer_id().is_none());
        assert!(pin.position().is_none());
    }

    #[test]
    fn test_mutators_do_not_touch_element() {
        let pin = pin();
        pin.set_location(LatLng::new(1.0, 2.0));
        pin.set_anchor(Point::new(3.0, 4.0));

        assert_eq!(pin.location(), LatLng::new(1.0, 2.0));
        assert_eq!(pin.anchor(), Point::new(3.0, 4.0));
        assert!(pin.position().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let pin = pin();
        let alias = pin.clone();
        alias.set_location(LatLng::new(5.0, 6.0));

        assert_eq!(pin.location(), LatLng::new(5.0, 6.0));
        assert_eq!(pin, alias);
        assert_ne!(pin, self::pin());
    }

    #[test]
    fn test_metadata() {
        let pin = pin().with_metadata(serde_json::json!({ "name": "Space Needle" }));
        assert_eq!(pin.metadata().unwrap()["name"], "Space Needle");

        pin.set_metadata(None);
        assert!(pin.metadata().is_none());
    }

    #[test]
    fn test_element_is_absolutely_positioned() {
        let pin = pin();
        assert_eq!(
            pin.element().style().position,
            crate::ui::element::CssPosition::Absolute
        );
    }
}
