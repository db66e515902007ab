//! Minimal DOM-equivalent node used for pushpin content and layer containers.
//!
//! An [`HtmlElement`] is a shared handle: clones point at the same node, so a
//! pin and the container it was appended to observe the same style writes.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// CSS `position` values the overlay cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CssPosition {
    #[default]
    Static,
    Absolute,
}

impl std::fmt::Display for CssPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CssPosition::Static => write!(f, "static"),
            CssPosition::Absolute => write!(f, "absolute"),
        }
    }
}

/// Inline style of an element. Offsets are in CSS pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub position: CssPosition,
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub hidden: bool,
}

impl Style {
    /// `position: absolute` placed at the given offset
    pub fn absolute_at(left: f64, top: f64) -> Self {
        Self {
            position: CssPosition::Absolute,
            left: Some(left),
            top: Some(top),
            hidden: false,
        }
    }

    fn to_css(&self) -> String {
        let mut css = String::new();
        if self.position != CssPosition::Static {
            css.push_str(&format!("position:{};", self.position));
        }
        if let Some(left) = self.left {
            css.push_str(&format!("left:{}px;", left));
        }
        if let Some(top) = self.top {
            css.push_str(&format!("top:{}px;", top));
        }
        if self.hidden {
            css.push_str("display:none;");
        }
        css
    }
}

#[derive(Debug)]
struct ElementData {
    tag: String,
    inner_html: String,
    style: Style,
    children: Vec<HtmlElement>,
}

/// Shared handle to an element node
#[derive(Debug, Clone)]
pub struct HtmlElement {
    inner: Arc<RwLock<ElementData>>,
}

impl HtmlElement {
    pub fn new(tag: &str) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ElementData {
                tag: tag.to_string(),
                inner_html: String::new(),
                style: Style::default(),
                children: Vec::new(),
            })),
        }
    }

    /// A `div`, the element type used for both pins and containers
    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn with_inner_html(self, html: impl Into<String>) -> Self {
        self.write().inner_html = html.into();
        self
    }

    pub fn with_style(self, style: Style) -> Self {
        self.write().style = style;
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, ElementData> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ElementData> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn tag(&self) -> String {
        self.read().tag.clone()
    }

    pub fn inner_html(&self) -> String {
        self.read().inner_html.clone()
    }

    pub fn style(&self) -> Style {
        self.read().style.clone()
    }

    /// Mutates the inline style in place
    pub fn update_style<F>(&self, f: F)
    where
        F: FnOnce(&mut Style),
    {
        f(&mut self.write().style);
    }

    /// Writes `left`/`top`, keeping the rest of the style
    pub fn set_offset(&self, left: f64, top: f64) {
        self.update_style(|style| {
            style.left = Some(left);
            style.top = Some(top);
        });
    }

    /// Appends a child, moving it to the end if it is already present
    pub fn append_child(&self, child: &HtmlElement) {
        let mut data = self.write();
        data.children.retain(|c| !c.ptr_eq(child));
        data.children.push(child.clone());
    }

    /// Removes a child, returning whether it was present
    pub fn remove_child(&self, child: &HtmlElement) -> bool {
        let mut data = self.write();
        let before = data.children.len();
        data.children.retain(|c| !c.ptr_eq(child));
        data.children.len() != before
    }

    /// Equivalent of `innerHTML = ''`
    pub fn clear(&self) {
        let mut data = self.write();
        data.children.clear();
        data.inner_html.clear();
    }

    pub fn children(&self) -> Vec<HtmlElement> {
        self.read().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.read().children.len()
    }

    pub fn contains_child(&self, child: &HtmlElement) -> bool {
        self.read().children.iter().any(|c| c.ptr_eq(child))
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &HtmlElement) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Serializes the node and its children to HTML
    pub fn outer_html(&self) -> String {
        let data = self.read();
        let mut html = String::new();
        let css = data.style.to_css();
        if css.is_empty() {
            html.push_str(&format!("<{}>", data.tag));
        } else {
            html.push_str(&format!("<{} style=\"{}\">", data.tag, css));
        }
        html.push_str(&data.inner_html);
        for child in &data.children {
            html.push_str(&child.outer_html());
        }
        html.push_str(&format!("</{}>", data.tag));
        html
    }
}
