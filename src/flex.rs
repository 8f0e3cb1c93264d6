//! Flexbox container.
//!
//! The container itself only sets flexbox properties on its own element.
//! Layout decisions for the items, including the optional bootstrap-like
//! column grid (`useGrid` + `columns`), are made by each [`LayoutBox`] from
//! the context this container hands down.
//!
//! [`LayoutBox`]: crate::LayoutBox

use crate::breakpoint::BreakpointTable;
use crate::context::{DisplayMode, Layout, LayoutContext};
use crate::error::{LayoutError, Result};
use crate::props::{css_keyword, LayoutProps};
use crate::style::{Declaration, ResolvedStyleBlock, StyleRule};

css_keyword! {
    /// `display` of a flex container.
    pub enum FlexDisplay {
        Flex => "flex",
        InlineFlex => "inline-flex",
    }
}

css_keyword! {
    /// `flex-direction`.
    pub enum FlexFlow {
        Row => "row",
        RowReverse => "row-reverse",
        Column => "column",
        ColumnReverse => "column-reverse",
    }
}

css_keyword! {
    /// `flex-wrap`.
    pub enum FlexWrap {
        NoWrap => "nowrap",
        Wrap => "wrap",
        WrapReverse => "wrap-reverse",
    }
}

css_keyword! {
    /// `justify-content` on the main axis.
    pub enum FlexJustify {
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
        Center => "center",
        SpaceAround => "space-around",
        SpaceBetween => "space-between",
    }
}

css_keyword! {
    /// `align-items` and `align-content` on the cross axis.
    pub enum FlexAlign {
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
        Center => "center",
        Stretch => "stretch",
        Baseline => "baseline",
    }
}

impl From<FlexDisplay> for DisplayMode {
    fn from(display: FlexDisplay) -> Self {
        match display {
            FlexDisplay::Flex => DisplayMode::Flex,
            FlexDisplay::InlineFlex => DisplayMode::InlineFlex,
        }
    }
}

pub(crate) const DEBUG_BACKGROUND: &str = "rgba(0,0,0,0.20)";

/// A flexbox container.
///
/// # Example
///
/// ```rust
/// use flexgrid::{FlexContainer, LayoutProps};
///
/// let flex = FlexContainer::from_props(
///     &LayoutProps::new().with("flow", "column").with("wrap", "wrap"),
/// )
/// .unwrap();
/// let css = flex.style().to_string();
/// assert!(css.contains("flex-direction: column;"));
/// assert!(css.contains("flex-wrap: wrap;"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FlexContainer {
    pub debug: bool,
    /// Enables the column grid for the items.
    pub use_grid: bool,
    /// Number of columns of the column grid.
    pub columns: u32,
    /// Breakpoints for the items; inherited from the parent context when unset.
    pub breakpoints: Option<BreakpointTable>,
    pub display: FlexDisplay,
    pub flow: FlexFlow,
    pub wrap: FlexWrap,
    pub justify: FlexJustify,
    pub align: FlexAlign,
    pub content: FlexAlign,
}

impl Default for FlexContainer {
    fn default() -> Self {
        Self {
            debug: false,
            use_grid: false,
            columns: 12,
            breakpoints: None,
            display: FlexDisplay::Flex,
            flow: FlexFlow::Row,
            wrap: FlexWrap::NoWrap,
            justify: FlexJustify::FlexStart,
            align: FlexAlign::FlexStart,
            content: FlexAlign::FlexStart,
        }
    }
}

impl FlexContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a container from a prop bag, validating every prop.
    pub fn from_props(props: &LayoutProps) -> Result<Self> {
        let defaults = Self::default();
        let columns = props.u32_prop("columns")?.unwrap_or(defaults.columns);
        if columns == 0 {
            return Err(LayoutError::invalid_prop("columns", "positive integer", "number 0"));
        }
        let breakpoints = props
            .get("breakPoints")
            .map(|value| BreakpointTable::from_prop("breakPoints", value))
            .transpose()?;

        Ok(Self {
            debug: props.bool_prop("debug")?.unwrap_or(defaults.debug),
            use_grid: props.bool_prop("useGrid")?.unwrap_or(defaults.use_grid),
            columns,
            breakpoints,
            display: props.keyword("display")?.unwrap_or(defaults.display),
            flow: props.keyword("flow")?.unwrap_or(defaults.flow),
            wrap: props.keyword("wrap")?.unwrap_or(defaults.wrap),
            justify: props.keyword("justify")?.unwrap_or(defaults.justify),
            align: props.keyword("align")?.unwrap_or(defaults.align),
            content: props.keyword("content")?.unwrap_or(defaults.content),
        })
    }

    /// The container's own declarations.
    pub fn style(&self) -> ResolvedStyleBlock {
        let mut rules: Vec<StyleRule> = vec![
            Declaration::new("display", self.display.to_string()).into(),
            Declaration::new("flex-direction", self.flow.to_string()).into(),
            Declaration::new("flex-wrap", self.wrap.to_string()).into(),
            Declaration::new("justify-content", self.justify.to_string()).into(),
            Declaration::new("align-items", self.align.to_string()).into(),
            Declaration::new("align-content", self.content.to_string()).into(),
            Declaration::new("position", "relative").into(),
        ];
        if self.debug {
            rules.push(Declaration::new("background", DEBUG_BACKGROUND).into());
        }
        ResolvedStyleBlock::new(rules)
    }
}

impl Layout for FlexContainer {
    fn style(&self, _ctx: &LayoutContext) -> Result<ResolvedStyleBlock> {
        Ok(FlexContainer::style(self))
    }

    fn child_context(&self, ctx: &LayoutContext) -> LayoutContext {
        LayoutContext {
            display: Some(self.display.into()),
            debug: self.debug,
            use_grid: self.use_grid,
            columns: Some(self.columns),
            breakpoints: self
                .breakpoints
                .clone()
                .unwrap_or_else(|| ctx.breakpoints.clone()),
            unknown_breakpoints: ctx.unknown_breakpoints,
        }
    }
}
