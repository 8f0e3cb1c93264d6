//! Stylesheet and document output for layout trees.
//!
//! - [`Stylesheet`]: every node of a tree resolved to scoped CSS
//! - [`DocumentRenderer`]: an HTML page built from a stylesheet via minijinja
//! - [`render_css`] and [`render_html`]: one-call helpers

mod document;
mod filters;
mod stylesheet;

pub use document::DocumentRenderer;
pub use stylesheet::{StyledNode, Stylesheet};

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::node::LayoutNode;

/// Resolves a tree and returns its stylesheet.
pub fn render_css(root: &LayoutNode, config: &LayoutConfig) -> Result<String> {
    Ok(Stylesheet::build(root, config)?.css())
}

/// Resolves a tree and renders it with the built-in document template.
pub fn render_html(root: &LayoutNode, config: &LayoutConfig, title: &str) -> Result<String> {
    let sheet = Stylesheet::build(root, config)?;
    DocumentRenderer::new()?.render(&sheet, title)
}
