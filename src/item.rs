//! Layout items.
//!
//! A [`LayoutBox`] styles itself according to the container it sits in:
//! flex item properties inside a flex container, proportional widths when
//! that container uses the column grid, and grid placement inside a grid
//! container. Visibility props (`hidden-<bp>`, `show-<bp>`) apply anywhere.

use crate::context::{Layout, LayoutContext};
use crate::error::{LayoutError, Result};
use crate::props::{css_keyword, LayoutProps, PropValue};
use crate::resolve::{StyleResolver, UnknownBreakpointPolicy};
use crate::style::{Declaration, MediaRule, ResolvedStyleBlock, StyleRule};
use crate::values::{is_safe_value, percentage, Placement};

css_keyword! {
    /// `align-self` of a flex item.
    pub enum SelfAlign {
        Auto => "auto",
        FlexStart => "flex-start",
        FlexEnd => "flex-end",
        Center => "center",
        Baseline => "baseline",
        Stretch => "stretch",
    }
}

const DEBUG_BORDER: &str = "1px dashed black";

/// A child of a flex or grid container.
///
/// # Example
///
/// ```rust
/// use flexgrid::{FlexContainer, Layout, LayoutBox, LayoutContext, LayoutProps};
///
/// let row = FlexContainer::from_props(&LayoutProps::new().with("useGrid", true)).unwrap();
/// let ctx = row.child_context(&LayoutContext::default());
///
/// let item = LayoutBox::from_props(&LayoutProps::new().with("col", 6).with("col-phone", 12)).unwrap();
/// let block = item.style(&ctx).unwrap();
/// assert_eq!(block.value_at("width", 1024).as_deref(), Some("50%"));
/// assert_eq!(block.value_at("width", 400).as_deref(), Some("100%"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    order: i64,
    flex: String,
    flex_align: SelfAlign,
    col: u32,
    push: u32,
    column: Option<Placement>,
    row: Option<Placement>,
    area: Option<String>,
    props: LayoutProps,
}

impl Default for LayoutBox {
    fn default() -> Self {
        Self {
            order: 1,
            flex: "1".to_string(),
            flex_align: SelfAlign::Auto,
            col: 1,
            push: 0,
            column: None,
            row: None,
            area: None,
            props: LayoutProps::new(),
        }
    }
}

impl LayoutBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a box from a prop bag, validating base values and overrides.
    pub fn from_props(props: &LayoutProps) -> Result<Self> {
        let defaults = Self::default();

        for base in ["col", "push"] {
            for (name, value) in props.overrides(base) {
                if value.as_u32().is_none() {
                    return Err(LayoutError::invalid_prop(
                        format!("{}-{}", base, name),
                        "non-negative integer",
                        value.describe(),
                    ));
                }
            }
        }
        for (name, value) in props.overrides("area") {
            area_from_prop(&format!("area-{}", name), value)?;
        }
        for base in ["column", "row"] {
            for (name, value) in props.overrides(base) {
                Placement::from_prop(&format!("{}-{}", base, name), value)?;
            }
        }
        for base in ["hidden", "show"] {
            for (name, value) in props.overrides(base) {
                if value.as_bool().is_none() {
                    return Err(LayoutError::invalid_prop(
                        format!("{}-{}", base, name),
                        "boolean",
                        value.describe(),
                    ));
                }
            }
        }

        let flex = match props.get("flex") {
            None => defaults.flex,
            Some(value) => flex_from_prop(value)?,
        };

        Ok(Self {
            order: props.i64_prop("order")?.unwrap_or(defaults.order),
            flex,
            flex_align: props.keyword("flexAlign")?.unwrap_or(defaults.flex_align),
            col: props.u32_prop("col")?.unwrap_or(defaults.col),
            push: props.u32_prop("push")?.unwrap_or(defaults.push),
            column: props
                .get("column")
                .map(|value| Placement::from_prop("column", value))
                .transpose()?,
            row: props
                .get("row")
                .map(|value| Placement::from_prop("row", value))
                .transpose()?,
            area: props
                .get("area")
                .map(|value| area_from_prop("area", value))
                .transpose()?,
            props: props.clone(),
        })
    }

    pub fn order(&self) -> i64 {
        self.order
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    pub fn push(&self) -> u32 {
        self.push
    }

    fn flex_rules(&self, ctx: &LayoutContext) -> Vec<StyleRule> {
        let mut rules: Vec<StyleRule> = vec![Declaration::new("order", self.order.to_string()).into()];
        if !ctx.use_grid {
            rules.push(Declaration::new("flex", self.flex.clone()).into());
        }
        rules.push(Declaration::new("align-self", self.flex_align.to_string()).into());
        rules
    }

    fn column_grid_rules(&self, resolver: &StyleResolver<'_>, columns: u32) -> Result<Vec<StyleRule>> {
        let mut rules: Vec<StyleRule> = vec![
            Declaration::new("width", percentage(self.col, columns)).into(),
            Declaration::new("margin-left", percentage(self.push, columns)).into(),
        ];
        let media = resolver.combined_media_rules(&["col", "push"], |base, value| {
            let span = value
                .as_u32()
                .ok_or_else(|| LayoutError::invalid_prop(base, "non-negative integer", value.describe()))?;
            let property = if base == "col" { "width" } else { "margin-left" };
            Ok(vec![Declaration::new(property, percentage(span, columns))])
        })?;
        rules.extend(media.into_iter().map(StyleRule::from));
        Ok(rules)
    }

    fn grid_rules(&self, resolver: &StyleResolver<'_>) -> Result<Vec<StyleRule>> {
        let mut rules: Vec<StyleRule> = Vec::new();
        if let Some(area) = &self.area {
            rules.push(Declaration::new("grid-area", area.clone()).into());
        }
        if let Some(column) = &self.column {
            rules.push(Declaration::new("grid-column", column.as_css()).into());
        }
        if let Some(row) = &self.row {
            rules.push(Declaration::new("grid-row", row.as_css()).into());
        }

        let area = resolver.media_rules("area", |value| {
            Ok(vec![Declaration::new("grid-area", area_from_prop("area", value)?)])
        })?;
        let column = resolver.media_rules("column", |value| {
            Ok(vec![Declaration::new("grid-column", Placement::from_prop("column", value)?.as_css())])
        })?;
        let row = resolver.media_rules("row", |value| {
            Ok(vec![Declaration::new("grid-row", Placement::from_prop("row", value)?.as_css())])
        })?;
        rules.extend(area.into_iter().chain(column).chain(row).map(StyleRule::from));
        Ok(rules)
    }

    fn visibility_rules(&self, resolver: &StyleResolver<'_>) -> Result<Vec<StyleRule>> {
        let hidden = flag_rules(resolver, "hidden", "none")?;
        let show = flag_rules(resolver, "show", "block")?;

        let mut rules: Vec<StyleRule> = hidden.into_iter().map(StyleRule::from).collect();
        if !show.is_empty() {
            rules.push(Declaration::new("display", "none").into());
        }
        rules.extend(show.into_iter().map(StyleRule::from));
        Ok(rules)
    }
}

/// Media rules setting `display` for every `<base>-<bp>` flag that is true.
fn flag_rules(resolver: &StyleResolver<'_>, base: &str, display: &str) -> Result<Vec<MediaRule>> {
    resolver.media_rules(base, |value| match value.as_bool() {
        Some(true) => Ok(vec![Declaration::new("display", display)]),
        Some(false) => Ok(Vec::new()),
        None => Err(LayoutError::invalid_prop(base, "boolean", value.describe())),
    })
}

fn flex_from_prop(value: &PropValue) -> Result<String> {
    let flex = match value {
        PropValue::Text(s) => s.trim().to_string(),
        PropValue::Number(_) => value.to_string(),
        other => return Err(LayoutError::invalid_prop("flex", "string", other.describe())),
    };
    if !is_safe_value(&flex) {
        return Err(LayoutError::invalid_prop("flex", "flex shorthand", format!("{:?}", flex)));
    }
    Ok(flex)
}

fn area_from_prop(prop: &str, value: &PropValue) -> Result<String> {
    match value.as_str().map(str::trim) {
        Some(area) if is_safe_value(area) => Ok(area.to_string()),
        _ => Err(LayoutError::invalid_prop(prop, "grid area name", value.describe())),
    }
}

/// Props accepting `<base>-<breakpoint>` overrides, whatever the parent.
const RESPONSIVE: [&str; 7] = ["col", "push", "area", "column", "row", "hidden", "show"];

impl Layout for LayoutBox {
    fn style(&self, ctx: &LayoutContext) -> Result<ResolvedStyleBlock> {
        let resolver = ctx.resolver(&self.props);
        resolver.check_overrides(&RESPONSIVE)?;
        let resolver = resolver.with_policy(UnknownBreakpointPolicy::Ignore);

        let mut rules: Vec<StyleRule> = vec![Declaration::new("box-sizing", "border-box").into()];
        if ctx.debug {
            rules.push(Declaration::new("border", DEBUG_BORDER).into());
        }

        match ctx.display {
            Some(display) if display.is_flex() => {
                rules.extend(self.flex_rules(ctx));
                if let Some(columns) = ctx.grid_columns() {
                    rules.extend(self.column_grid_rules(&resolver, columns)?);
                }
            }
            Some(display) if display.is_grid() => rules.extend(self.grid_rules(&resolver)?),
            _ => {}
        }

        rules.extend(self.visibility_rules(&resolver)?);
        Ok(ResolvedStyleBlock::new(rules))
    }

    fn child_context(&self, ctx: &LayoutContext) -> LayoutContext {
        ctx.detached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::BreakpointTable;
    use crate::context::DisplayMode;
    use crate::flex::FlexContainer;
    use crate::grid::GridContainer;

    fn phone_only() -> LayoutContext {
        LayoutContext::root(BreakpointTable::new([("phone", 576)]).unwrap())
    }

    fn in_flex(ctx: &LayoutContext, props: LayoutProps) -> LayoutContext {
        FlexContainer::from_props(&props).unwrap().child_context(ctx)
    }

    fn in_grid(ctx: &LayoutContext) -> LayoutContext {
        GridContainer::new().child_context(ctx)
    }

    fn style(props: LayoutProps, ctx: &LayoutContext) -> ResolvedStyleBlock {
        LayoutBox::from_props(&props).unwrap().style(ctx).unwrap()
    }

    #[test]
    fn test_root_box() {
        let block = LayoutBox::new().style(&LayoutContext::default()).unwrap();
        assert_eq!(block.to_string(), "box-sizing: border-box;\n");
    }

    #[test]
    fn test_flex_item_defaults() {
        let ctx = in_flex(&LayoutContext::default(), LayoutProps::new());
        let block = LayoutBox::new().style(&ctx).unwrap();
        assert_eq!(
            block.to_string(),
            "box-sizing: border-box;\norder: 1;\nflex: 1;\nalign-self: auto;\n"
        );
    }

    #[test]
    fn test_debug_border_from_parent() {
        let ctx = in_flex(&LayoutContext::default(), LayoutProps::new().with("debug", true));
        let block = LayoutBox::new().style(&ctx).unwrap();
        assert_eq!(block.base_value("border"), Some(DEBUG_BORDER));
    }

    #[test]
    fn test_column_grid_widths() {
        let ctx = in_flex(
            &LayoutContext::default(),
            LayoutProps::new().with("useGrid", true).with("columns", 12),
        );
        let block = style(LayoutProps::new().with("col", 4).with("push", 2), &ctx);

        assert!(block.base_value("width").unwrap().starts_with("33.33"));
        assert!(block.base_value("margin-left").unwrap().starts_with("16.66"));
        assert_eq!(block.base_value("flex"), None);
        assert_eq!(block.base_value("order"), Some("1"));
    }

    #[test]
    fn test_column_grid_media_combined() {
        let ctx = in_flex(&LayoutContext::default(), LayoutProps::new().with("useGrid", true));
        let props = LayoutProps::new()
            .with("col", 6)
            .with("col-phone", 12)
            .with("push-phone", 0)
            .with("col-tablet", 8);
        let block = style(props, &ctx);

        let media: Vec<&MediaRule> = block.media_rules().collect();
        assert_eq!(media.len(), 2);
        assert_eq!(media[0].breakpoint, "tablet");
        assert_eq!(media[0].declarations, vec![Declaration::new("width", percentage(8, 12))]);
        assert_eq!(
            media[1].declarations,
            vec![Declaration::new("width", "100%"), Declaration::new("margin-left", "0%")]
        );
    }

    #[test]
    fn test_column_grid_ignored_without_use_grid() {
        let ctx = in_flex(&LayoutContext::default(), LayoutProps::new());
        let block = style(LayoutProps::new().with("col", 4).with("col-phone", 12), &ctx);
        assert_eq!(block.base_value("width"), None);
        assert_eq!(block.media_rules().count(), 0);
    }

    #[test]
    fn test_grid_placement() {
        let ctx = in_grid(&LayoutContext::default());
        let props = LayoutProps::new()
            .with("area", "header")
            .with("column", PropValue::from(vec![PropValue::from(1), PropValue::from(3)]))
            .with("row", vec!["span 2"])
            .with("column-phone", vec![1, 2])
            .with("area-phone", "main");
        let block = style(props, &ctx);

        assert_eq!(block.base_value("grid-area"), Some("header"));
        assert_eq!(block.base_value("grid-column"), Some("1 / 3"));
        assert_eq!(block.base_value("grid-row"), Some("span 2"));
        assert_eq!(block.base_value("order"), None);

        let media: Vec<&MediaRule> = block.media_rules().collect();
        assert_eq!(media[0].declarations, vec![Declaration::new("grid-area", "main")]);
        assert_eq!(media[1].declarations, vec![Declaration::new("grid-column", "1 / 2")]);
    }

    #[test]
    fn test_grid_props_ignored_in_flex() {
        let ctx = in_flex(&LayoutContext::default(), LayoutProps::new());
        let block = style(LayoutProps::new().with("area", "a").with("area-phone", "b"), &ctx);
        assert_eq!(block.base_value("grid-area"), None);
        assert_eq!(block.media_rules().count(), 0);
    }

    #[test]
    fn test_show_phone() {
        let block = style(LayoutProps::new().with("show-phone", true), &phone_only());
        assert_eq!(block.value_at("display", 800).as_deref(), Some("none"));
        assert_eq!(block.value_at("display", 500).as_deref(), Some("block"));
    }

    #[test]
    fn test_hidden_phone() {
        let block = style(LayoutProps::new().with("hidden-phone", true), &phone_only());
        assert_eq!(block.value_at("display", 800), None);
        assert_eq!(block.value_at("display", 500).as_deref(), Some("none"));
    }

    #[test]
    fn test_false_flags_emit_nothing() {
        let block = style(
            LayoutProps::new().with("hidden-phone", false).with("show-phone", false),
            &phone_only(),
        );
        assert_eq!(block.to_string(), "box-sizing: border-box;\n");
    }

    #[test]
    fn test_hidden_before_show_and_single_base_display() {
        let props = LayoutProps::new()
            .with("hidden-desktop", true)
            .with("show-phone", true)
            .with("show-tablet", true);
        let block = style(props, &LayoutContext::default());
        let displays: Vec<&Declaration> = block
            .declarations()
            .filter(|d| d.property == "display")
            .collect();
        assert_eq!(displays.len(), 1);

        let media: Vec<(&str, &str)> = block
            .media_rules()
            .map(|m| (m.breakpoint.as_str(), m.declarations[0].value.as_str()))
            .collect();
        assert_eq!(
            media,
            vec![("desktop", "none"), ("tablet", "block"), ("phone", "block")]
        );
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        assert!(LayoutBox::from_props(&LayoutProps::new().with("col-phone", "six")).is_err());
        assert!(LayoutBox::from_props(&LayoutProps::new().with("push-phone", -1)).is_err());
        assert!(LayoutBox::from_props(&LayoutProps::new().with("hidden-phone", "yes")).is_err());
        assert!(LayoutBox::from_props(&LayoutProps::new().with("row-phone", vec![1, 2, 3])).is_err());
        assert!(LayoutBox::from_props(&LayoutProps::new().with("area", "a; color: red")).is_err());
        assert!(LayoutBox::from_props(&LayoutProps::new().with("flex", "1 1 auto}")).is_err());
    }

    #[test]
    fn test_comment_escape_and_open_bracket_rejected() {
        for (prop, value) in [("flex", "1 /*"), ("flex", "1\\"), ("area", "a ("), ("area-phone", "a */")] {
            let err = LayoutBox::from_props(&LayoutProps::new().with(prop, value)).unwrap_err();
            assert!(matches!(err, LayoutError::InvalidProp { .. }), "{}: {}", prop, value);
        }
    }

    #[test]
    fn test_unknown_breakpoint_checked_in_any_parent() {
        let strict = phone_only().with_policy(UnknownBreakpointPolicy::Error);
        let flex = in_flex(&strict, LayoutProps::new());
        let column_grid = in_flex(&strict, LayoutProps::new().with("useGrid", true));

        for (prop, value) in [
            ("area-watch", PropValue::from("main")),
            ("col-watch", PropValue::from(6)),
            ("column-watch", PropValue::from("1 / 3")),
        ] {
            let item = LayoutBox::from_props(&LayoutProps::new().with(prop, value)).unwrap();
            for ctx in [&strict, &flex, &column_grid] {
                assert_eq!(
                    item.style(ctx).unwrap_err(),
                    LayoutError::UnknownBreakpoint {
                        prop: prop.to_string(),
                        breakpoint: "watch".to_string(),
                    }
                );
            }
        }

        let item = LayoutBox::from_props(&LayoutProps::new().with("col-watch", 6)).unwrap();
        let block = item.style(&in_flex(&phone_only(), LayoutProps::new())).unwrap();
        assert_eq!(block.media_rules().count(), 0);
    }

    #[test]
    fn test_flex_shorthand_kept_verbatim() {
        let ctx = in_flex(&LayoutContext::default(), LayoutProps::new());
        let block = style(
            LayoutProps::new().with("flex", "0 0 200px").with("order", -1).with("flexAlign", "center"),
            &ctx,
        );
        assert_eq!(block.base_value("flex"), Some("0 0 200px"));
        assert_eq!(block.base_value("order"), Some("-1"));
        assert_eq!(block.base_value("align-self"), Some("center"));
    }

    #[test]
    fn test_child_context_is_detached() {
        let ctx = in_flex(&LayoutContext::default(), LayoutProps::new().with("useGrid", true));
        let child = LayoutBox::new().child_context(&ctx);
        assert_eq!(child.display, None);
        assert!(!child.use_grid);
        assert_eq!(ctx.display, Some(DisplayMode::Flex));
    }

    #[test]
    fn test_idempotent() {
        let ctx = in_flex(&LayoutContext::default(), LayoutProps::new().with("useGrid", true));
        let item = LayoutBox::from_props(
            &LayoutProps::new().with("col", 3).with("col-phone", 12).with("show-tablet", true),
        )
        .unwrap();
        let first = item.style(&ctx).unwrap().to_string();
        let second = item.style(&ctx).unwrap().to_string();
        assert_eq!(first, second);
    }
}
