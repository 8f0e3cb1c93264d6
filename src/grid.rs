//! CSS grid container.
//!
//! `columns`, `rows` and `areas` accept per-breakpoint overrides
//! (`columns-tablet`, `rows-phone`, `areas-phone`, ...). Each property's base
//! value is emitted first, followed by its media rules from the widest
//! breakpoint to the narrowest.

use crate::breakpoint::BreakpointTable;
use crate::context::{DisplayMode, Layout, LayoutContext};
use crate::error::Result;
use crate::flex::DEBUG_BACKGROUND;
use crate::props::{css_keyword, LayoutProps, PropValue};
use crate::resolve::{StyleResolver, UnknownBreakpointPolicy};
use crate::style::{Declaration, ResolvedStyleBlock, StyleRule};
use crate::values::{AreaMatrix, TrackList};

css_keyword! {
    /// `display` of a grid container.
    pub enum GridDisplay {
        Grid => "grid",
        InlineGrid => "inline-grid",
    }
}

css_keyword! {
    /// `justify-items` and `align-items` inside grid cells.
    pub enum GridAlign {
        Start => "start",
        End => "end",
        Center => "center",
        Stretch => "stretch",
    }
}

css_keyword! {
    /// `grid-auto-flow`.
    pub enum GridFlow {
        Row => "row",
        Column => "column",
        RowDense => "row dense",
        ColumnDense => "column dense",
    }
}

impl From<GridDisplay> for DisplayMode {
    fn from(display: GridDisplay) -> Self {
        match display {
            GridDisplay::Grid => DisplayMode::Grid,
            GridDisplay::InlineGrid => DisplayMode::InlineGrid,
        }
    }
}

/// Props that take per-breakpoint overrides, with their CSS property.
const RESPONSIVE: [(&str, &str); 3] = [
    ("columns", "grid-template-columns"),
    ("rows", "grid-template-rows"),
    ("areas", "grid-template-areas"),
];

/// A CSS grid container.
///
/// # Example
///
/// ```rust
/// use flexgrid::{BreakpointTable, GridContainer, Layout, LayoutContext, LayoutProps};
///
/// let props = LayoutProps::new()
///     .with("columns", "repeat(3, 1fr)")
///     .with("areas", ["a a b"])
///     .with("areas-small", ["a a", "b b"])
///     .with("columns-small", ["1fr", "1fr"]);
/// let grid = GridContainer::from_props(&props).unwrap();
///
/// let ctx = LayoutContext::root(BreakpointTable::new([("small", 500)]).unwrap());
/// let block = grid.style(&ctx).unwrap();
/// assert_eq!(block.value_at("grid-template-columns", 400).as_deref(), Some("1fr 1fr"));
/// assert_eq!(block.value_at("grid-template-areas", 800).as_deref(), Some(r#""a a b""#));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridContainer {
    debug: bool,
    breakpoints: Option<BreakpointTable>,
    display: GridDisplay,
    columns: Option<TrackList>,
    rows: Option<TrackList>,
    auto_columns: Option<TrackList>,
    auto_rows: Option<TrackList>,
    areas: Option<AreaMatrix>,
    gap: Option<u32>,
    justify: GridAlign,
    align: GridAlign,
    flow: GridFlow,
    /// Retained for the per-breakpoint overrides.
    props: LayoutProps,
}

impl Default for GridContainer {
    fn default() -> Self {
        Self {
            debug: false,
            breakpoints: None,
            display: GridDisplay::Grid,
            columns: None,
            rows: None,
            auto_columns: None,
            auto_rows: None,
            areas: None,
            gap: None,
            justify: GridAlign::Stretch,
            align: GridAlign::Stretch,
            flow: GridFlow::Row,
            props: LayoutProps::new(),
        }
    }
}

impl GridContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a container from a prop bag.
    ///
    /// Base values and every `columns-*`, `rows-*` and `areas-*` override are
    /// validated here, whichever breakpoint they name.
    pub fn from_props(props: &LayoutProps) -> Result<Self> {
        let defaults = Self::default();

        for (base, _) in RESPONSIVE {
            for (name, value) in props.overrides(base) {
                format_responsive(base, &format!("{}-{}", base, name), value)?;
            }
        }

        Ok(Self {
            debug: props.bool_prop("debug")?.unwrap_or(defaults.debug),
            breakpoints: props
                .get("breakPoints")
                .map(|value| BreakpointTable::from_prop("breakPoints", value))
                .transpose()?,
            display: props.keyword("display")?.unwrap_or(defaults.display),
            columns: track_prop(props, "columns")?,
            rows: track_prop(props, "rows")?,
            auto_columns: track_prop(props, "auto-columns")?,
            auto_rows: track_prop(props, "auto-rows")?,
            areas: props
                .get("areas")
                .map(|value| AreaMatrix::from_prop("areas", value))
                .transpose()?,
            gap: props.u32_prop("gap")?,
            justify: props.keyword("justify")?.unwrap_or(defaults.justify),
            align: props.keyword("align")?.unwrap_or(defaults.align),
            flow: props.keyword("flow")?.unwrap_or(defaults.flow),
            props: props.clone(),
        })
    }

    pub fn display(&self) -> GridDisplay {
        self.display
    }

    pub fn columns(&self) -> Option<&TrackList> {
        self.columns.as_ref()
    }

    pub fn rows(&self) -> Option<&TrackList> {
        self.rows.as_ref()
    }

    pub fn areas(&self) -> Option<&AreaMatrix> {
        self.areas.as_ref()
    }

    fn breakpoints_for<'a>(&'a self, ctx: &'a LayoutContext) -> &'a BreakpointTable {
        self.breakpoints.as_ref().unwrap_or(&ctx.breakpoints)
    }
}

fn track_prop(props: &LayoutProps, name: &str) -> Result<Option<TrackList>> {
    props
        .get(name)
        .map(|value| TrackList::from_prop(name, value))
        .transpose()
}

/// Formats a `columns`, `rows` or `areas` value as its declaration.
fn format_responsive(base: &str, prop: &str, value: &PropValue) -> Result<Vec<Declaration>> {
    let (property, css) = match base {
        "columns" => ("grid-template-columns", TrackList::from_prop(prop, value)?.as_css()),
        "rows" => ("grid-template-rows", TrackList::from_prop(prop, value)?.as_css()),
        _ => ("grid-template-areas", AreaMatrix::from_prop(prop, value)?.as_css()),
    };
    Ok(vec![Declaration::new(property, css)])
}

impl Layout for GridContainer {
    fn style(&self, ctx: &LayoutContext) -> Result<ResolvedStyleBlock> {
        let breakpoints = self.breakpoints_for(ctx);
        let resolver = StyleResolver::new(breakpoints, &self.props)
            .with_policy(ctx.unknown_breakpoints);
        resolver.check_overrides(&RESPONSIVE.map(|(base, _)| base))?;
        let resolver = resolver.with_policy(UnknownBreakpointPolicy::Ignore);

        let mut rules: Vec<StyleRule> =
            vec![Declaration::new("display", self.display.to_string()).into()];

        let bases = [
            (self.columns.as_ref().map(TrackList::as_css), Some(&self.auto_columns), "grid-auto-columns"),
            (self.rows.as_ref().map(TrackList::as_css), Some(&self.auto_rows), "grid-auto-rows"),
            (self.areas.as_ref().map(AreaMatrix::as_css), None, ""),
        ];
        for ((base, property), (value, auto, auto_property)) in RESPONSIVE.into_iter().zip(bases) {
            if let Some(css) = value {
                rules.push(Declaration::new(property, css).into());
            }
            let media = resolver.media_rules(base, |v| format_responsive(base, base, v))?;
            rules.extend(media.into_iter().map(StyleRule::from));
            if let Some(Some(tracks)) = auto {
                rules.push(Declaration::new(auto_property, tracks.as_css()).into());
            }
        }

        if let Some(gap) = self.gap {
            rules.push(Declaration::new("grid-gap", format!("{}px", gap)).into());
        }
        rules.push(Declaration::new("justify-items", self.justify.to_string()).into());
        rules.push(Declaration::new("align-items", self.align.to_string()).into());
        rules.push(Declaration::new("grid-auto-flow", self.flow.to_string()).into());
        if self.debug {
            rules.push(Declaration::new("background", DEBUG_BACKGROUND).into());
        }

        Ok(ResolvedStyleBlock::new(rules))
    }

    fn child_context(&self, ctx: &LayoutContext) -> LayoutContext {
        LayoutContext {
            display: Some(self.display.into()),
            debug: self.debug,
            use_grid: false,
            columns: None,
            breakpoints: self.breakpoints_for(ctx).clone(),
            unknown_breakpoints: ctx.unknown_breakpoints,
        }
    }
}
