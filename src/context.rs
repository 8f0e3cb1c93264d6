//! Parent-to-child layout context.
//!
//! Containers do not reach into their children. Instead each node implements
//! [`Layout`]: it resolves its own style from the [`LayoutContext`] handed
//! down by its parent, and produces the context its direct children receive.

use crate::breakpoint::BreakpointTable;
use crate::error::Result;
use crate::props::{css_keyword, LayoutProps};
use crate::resolve::{StyleResolver, UnknownBreakpointPolicy};
use crate::style::ResolvedStyleBlock;

css_keyword! {
    /// How a container lays out its children.
    pub enum DisplayMode {
        Flex => "flex",
        InlineFlex => "inline-flex",
        Grid => "grid",
        InlineGrid => "inline-grid",
    }
}

/// The kind of a layout container, named by its display mode.
pub type ContainerKind = DisplayMode;

impl DisplayMode {
    pub fn is_flex(self) -> bool {
        matches!(self, DisplayMode::Flex | DisplayMode::InlineFlex)
    }

    pub fn is_grid(self) -> bool {
        matches!(self, DisplayMode::Grid | DisplayMode::InlineGrid)
    }
}

/// Values a container forwards to each of its direct children.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutContext {
    /// Display mode of the parent container; `None` outside any container.
    pub display: Option<DisplayMode>,
    pub debug: bool,
    /// Whether the parent emulates a column grid with proportional widths.
    pub use_grid: bool,
    /// Column count of the parent's column grid.
    pub columns: Option<u32>,
    pub breakpoints: BreakpointTable,
    pub unknown_breakpoints: UnknownBreakpointPolicy,
}

impl LayoutContext {
    /// A context for a node without a layout parent.
    pub fn root(breakpoints: BreakpointTable) -> Self {
        Self {
            display: None,
            debug: false,
            use_grid: false,
            columns: None,
            breakpoints,
            unknown_breakpoints: UnknownBreakpointPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownBreakpointPolicy) -> Self {
        self.unknown_breakpoints = policy;
        self
    }

    /// Builds a resolver for `props` against this context's breakpoints.
    pub fn resolver<'a>(&'a self, props: &'a LayoutProps) -> StyleResolver<'a> {
        StyleResolver::new(&self.breakpoints, props).with_policy(self.unknown_breakpoints)
    }

    /// The column count in effect when the parent uses a column grid.
    pub fn grid_columns(&self) -> Option<u32> {
        if self.use_grid {
            self.columns
        } else {
            None
        }
    }

    /// A root-like context that keeps only breakpoints, debug and policy.
    pub fn detached(&self) -> Self {
        Self {
            display: None,
            debug: self.debug,
            use_grid: false,
            columns: None,
            breakpoints: self.breakpoints.clone(),
            unknown_breakpoints: self.unknown_breakpoints,
        }
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::root(BreakpointTable::standard())
    }
}

/// Shared interface of every layout node.
pub trait Layout {
    /// Resolves this node's style given the context from its parent.
    fn style(&self, ctx: &LayoutContext) -> Result<ResolvedStyleBlock>;

    /// The context handed to each direct child of this node.
    fn child_context(&self, ctx: &LayoutContext) -> LayoutContext;
}
