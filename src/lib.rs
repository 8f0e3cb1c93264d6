//! Responsive flexbox and grid layout primitives rendered to CSS.
//!
//! Layout nodes take a bag of props and resolve it into an ordered
//! [`ResolvedStyleBlock`]: base declarations followed by `max-width` media
//! rules for every per-breakpoint override, widest breakpoint first.
//!
//! # Layout primitives
//!
//! - [`FlexContainer`]: flexbox container, optionally driving a column grid
//! - [`GridContainer`]: CSS grid container with responsive tracks and areas
//! - [`LayoutBox`]: item that adapts to its parent's display mode
//!
//! Props ending in `-<breakpoint>` override the base prop below that
//! breakpoint's threshold (`col-phone`, `columns-tablet`, `hidden-laptop`).
//!
//! # Example
//!
//! ```rust
//! use flexgrid::{FlexContainer, Layout, LayoutBox, LayoutContext, LayoutProps};
//!
//! let row = FlexContainer::from_props(
//!     &LayoutProps::new().with("useGrid", true).with("columns", 12),
//! )
//! .unwrap();
//! let ctx = row.child_context(&LayoutContext::default());
//!
//! let cell = LayoutBox::from_props(
//!     &LayoutProps::new().with("col", 4).with("col-phone", 12).with("hidden-tablet", true),
//! )
//! .unwrap();
//! let css = cell.style(&ctx).unwrap().to_stylesheet(".cell");
//!
//! assert!(css.contains("width: 33.33"));
//! assert!(css.contains("@media (max-width: 576px) {\n  .cell {\n    width: 100%;"));
//! ```
//!
//! # Layout trees
//!
//! Whole layouts load from YAML or JSON as [`LayoutNode`] trees. A
//! [`Stylesheet`] resolves each node against the context handed down by its
//! parent, and [`DocumentRenderer`] turns the result into an HTML page.
//! Breakpoints, the unknown-breakpoint policy and class names come from
//! [`LayoutConfig`].

mod breakpoint;
mod config;
mod context;
mod error;
mod flex;
mod grid;
mod item;
mod node;
mod props;
mod render;
mod resolve;
mod style;
mod values;

pub use breakpoint::{Breakpoint, BreakpointTable};
pub use config::LayoutConfig;
pub use context::{ContainerKind, DisplayMode, Layout, LayoutContext};
pub use error::{LayoutError, Result};
pub use flex::{FlexAlign, FlexContainer, FlexDisplay, FlexFlow, FlexJustify, FlexWrap};
pub use grid::{GridAlign, GridContainer, GridDisplay, GridFlow};
pub use item::{LayoutBox, SelfAlign};
pub use node::{Element, LayoutNode, NodeKind};
pub use props::{CssKeyword, LayoutProps, PropValue};
pub use render::{render_css, render_html, DocumentRenderer, StyledNode, Stylesheet};
pub use resolve::{resolve_property, StyleResolver, UnknownBreakpointPolicy};
pub use style::{Declaration, MediaRule, ResolvedStyleBlock, StyleRule};
pub use values::{percentage, AreaMatrix, GridLine, Placement, TrackList};
