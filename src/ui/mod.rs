pub mod element;

pub use element::{CssPosition, HtmlElement, Style};
