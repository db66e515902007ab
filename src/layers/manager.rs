use crate::{host::CustomOverlay, MapError, Result};
use fxhash::FxHashMap as HashMap;
use std::sync::Arc;

/// Keeps the overlays registered with a host in render order.
///
/// Overlays beneath the map labels come first, then the rest; within each
/// band lower z-index draws first and ties keep insertion order.
pub struct LayerManager {
    /// All overlays indexed by ID
    overlays: HashMap<String, Arc<dyn CustomOverlay>>,
    /// Ordered list of overlay IDs for rendering
    render_order: Vec<String>,
}

fn stacking_key(overlay: &dyn CustomOverlay) -> (bool, i32) {
    (!overlay.beneath_labels(), overlay.z_index())
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            overlays: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds an overlay; ids must be unique
    pub fn add_overlay(&mut self, overlay: Arc<dyn CustomOverlay>) -> Result<()> {
        let overlay_id = overlay.id().to_string();
        if self.overlays.contains_key(&overlay_id) {
            return Err(MapError::Layer(format!("overlay {} already added", overlay_id)).into());
        }
        let key = stacking_key(overlay.as_ref());
        self.overlays.insert(overlay_id.clone(), overlay);
        self.insert_sorted(overlay_id, key);
        Ok(())
    }

    /// Moves an overlay to the slot its current stacking keys call for.
    /// Returns false if the overlay is unknown.
    pub fn reorder(&mut self, overlay_id: &str) -> bool {
        let Some(overlay) = self.overlays.get(overlay_id) else {
            return false;
        };
        let key = stacking_key(overlay.as_ref());
        self.render_order.retain(|id| id != overlay_id);
        self.insert_sorted(overlay_id.to_string(), key);
        true
    }

    // After every overlay with the same key
    fn insert_sorted(&mut self, overlay_id: String, key: (bool, i32)) {
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.overlays
                    .get(id)
                    .map(|o| stacking_key(o.as_ref()) > key)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, overlay_id);
    }

    /// Removes an overlay from the manager
    pub fn remove_overlay(&mut self, overlay_id: &str) -> Option<Arc<dyn CustomOverlay>> {
        self.render_order.retain(|id| id != overlay_id);
        self.overlays.remove(overlay_id)
    }

    pub fn get_overlay(&self, overlay_id: &str) -> Option<Arc<dyn CustomOverlay>> {
        self.overlays.get(overlay_id).cloned()
    }

    pub fn contains(&self, overlay_id: &str) -> bool {
        self.overlays.contains_key(overlay_id)
    }

    /// Overlay IDs in render order
    pub fn render_order(&self) -> &[String] {
        &self.render_order
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
