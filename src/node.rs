//! Layout trees.
//!
//! A layout file describes a tree of nodes:
//!
//! ```yaml
//! kind: flex
//! props: { useGrid: true }
//! children:
//!   - kind: box
//!     props: { col: 4, col-phone: 12 }
//!     text: Sidebar
//!   - kind: box
//!     props: { col: 8, hidden-phone: true }
//! ```
//!
//! Props are validated while the tree is decoded, so a tree that loads
//! always resolves to valid CSS.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::context::{Layout, LayoutContext};
use crate::error::{LayoutError, Result};
use crate::flex::FlexContainer;
use crate::grid::GridContainer;
use crate::item::LayoutBox;
use crate::props::LayoutProps;
use crate::style::ResolvedStyleBlock;

/// The kind of a layout node as written in layout files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Flex,
    Grid,
    Box,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Flex => "flex",
            NodeKind::Grid => "grid",
            NodeKind::Box => "box",
        }
    }
}

/// A validated layout element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Flex(FlexContainer),
    Grid(GridContainer),
    Box(LayoutBox),
}

impl Element {
    /// Builds the element of `kind` from its props.
    pub fn from_props(kind: NodeKind, props: &LayoutProps) -> Result<Self> {
        Ok(match kind {
            NodeKind::Flex => Element::Flex(FlexContainer::from_props(props)?),
            NodeKind::Grid => Element::Grid(GridContainer::from_props(props)?),
            NodeKind::Box => Element::Box(LayoutBox::from_props(props)?),
        })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Element::Flex(_) => NodeKind::Flex,
            Element::Grid(_) => NodeKind::Grid,
            Element::Box(_) => NodeKind::Box,
        }
    }
}

impl Layout for Element {
    fn style(&self, ctx: &LayoutContext) -> Result<ResolvedStyleBlock> {
        match self {
            Element::Flex(flex) => Layout::style(flex, ctx),
            Element::Grid(grid) => grid.style(ctx),
            Element::Box(item) => item.style(ctx),
        }
    }

    fn child_context(&self, ctx: &LayoutContext) -> LayoutContext {
        match self {
            Element::Flex(flex) => flex.child_context(ctx),
            Element::Grid(grid) => grid.child_context(ctx),
            Element::Box(item) => item.child_context(ctx),
        }
    }
}

/// Node as written in a layout file, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "LayoutProps::is_empty")]
    props: LayoutProps,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<LayoutNode>,
}

/// A node of a layout tree.
///
/// # Example
///
/// ```rust
/// use flexgrid::{Layout, LayoutContext, LayoutNode, NodeKind};
///
/// let tree = LayoutNode::from_yaml(
///     "kind: grid\nprops: { areas: ['a b'] }\nchildren:\n  - { kind: box, props: { area: a } }\n",
/// )
/// .unwrap();
/// assert_eq!(tree.kind(), NodeKind::Grid);
///
/// let ctx = tree.child_context(&LayoutContext::default());
/// let child = tree.children()[0].style(&ctx).unwrap();
/// assert_eq!(child.base_value("grid-area"), Some("a"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct LayoutNode {
    element: Element,
    props: LayoutProps,
    text: Option<String>,
    children: Vec<LayoutNode>,
}

impl LayoutNode {
    /// Builds a node, validating its props.
    pub fn new(kind: NodeKind, props: LayoutProps) -> Result<Self> {
        Ok(Self {
            element: Element::from_props(kind, &props)?,
            props,
            text: None,
            children: Vec::new(),
        })
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: LayoutNode) -> Self {
        self.children.push(child);
        self
    }

    /// Parses a tree from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a tree from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a tree from a file, choosing the format by extension.
    ///
    /// `.json` files are parsed as JSON; anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|err| LayoutError::Config {
            message: format!("failed to read {}: {}", path.display(), err),
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&source),
            _ => Self::from_yaml(&source),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.element.kind()
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn props(&self) -> &LayoutProps {
        &self.props
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[LayoutNode] {
        &self.children
    }
}

impl Layout for LayoutNode {
    fn style(&self, ctx: &LayoutContext) -> Result<ResolvedStyleBlock> {
        self.element.style(ctx)
    }

    fn child_context(&self, ctx: &LayoutContext) -> LayoutContext {
        self.element.child_context(ctx)
    }
}

impl TryFrom<RawNode> for LayoutNode {
    type Error = LayoutError;

    fn try_from(raw: RawNode) -> Result<Self> {
        let mut node = LayoutNode::new(raw.kind, raw.props)?;
        node.text = raw.text;
        node.children = raw.children;
        Ok(node)
    }
}

impl From<LayoutNode> for RawNode {
    fn from(node: LayoutNode) -> Self {
        RawNode {
            kind: node.kind(),
            props: node.props,
            text: node.text,
            children: node.children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
kind: flex
props:
  useGrid: true
  columns: 12
children:
  - kind: box
    props: { col: 4, col-phone: 12 }
    text: Sidebar
  - kind: box
    props: { col: 8, hidden-phone: true }
    text: Content
"#;

    #[test]
    fn test_from_yaml() {
        let tree = LayoutNode::from_yaml(PAGE).unwrap();
        assert_eq!(tree.kind(), NodeKind::Flex);
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.children()[0].text(), Some("Sidebar"));
        assert_eq!(tree.children()[1].props().u32_prop("col").unwrap(), Some(8));
    }

    #[test]
    fn test_from_json() {
        let tree = LayoutNode::from_json(
            r#"{"kind": "grid", "props": {"columns": ["1fr", "2fr"]}, "children": [{"kind": "box"}]}"#,
        )
        .unwrap();
        assert_eq!(tree.kind(), NodeKind::Grid);
        assert_eq!(tree.children()[0].kind(), NodeKind::Box);
    }

    #[test]
    fn test_invalid_props_fail_decoding() {
        let err = LayoutNode::from_yaml("kind: grid\nprops: { areas: ['a a', 'b'] }\n").unwrap_err();
        assert!(matches!(err, LayoutError::Config { .. }));
        assert!(err.to_string().contains("row 2 has 1 cells, expected 2"));
    }

    #[test]
    fn test_unknown_kind_and_field() {
        assert!(LayoutNode::from_yaml("kind: table\n").is_err());
        assert!(LayoutNode::from_yaml("kind: box\nclass: x\n").is_err());
    }

    #[test]
    fn test_children_use_parent_context() {
        let tree = LayoutNode::from_yaml(PAGE).unwrap();
        let ctx = tree.child_context(&LayoutContext::default());
        let sidebar = tree.children()[0].style(&ctx).unwrap();
        assert!(sidebar.base_value("width").unwrap().starts_with("33.33"));
        assert_eq!(sidebar.value_at("width", 400).as_deref(), Some("100%"));
    }

    #[test]
    fn test_builder_and_serialize() {
        let tree = LayoutNode::new(NodeKind::Flex, LayoutProps::new())
            .unwrap()
            .with_child(
                LayoutNode::new(NodeKind::Box, LayoutProps::new().with("order", 2))
                    .unwrap()
                    .with_text("one"),
            );
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["kind"], "flex");
        assert_eq!(json["children"][0]["props"]["order"], 2.0);
        assert_eq!(json["children"][0]["text"], "one");
        assert!(json.get("props").is_none());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("page.yaml");
        std::fs::write(&yaml, PAGE).unwrap();
        assert_eq!(LayoutNode::load(&yaml).unwrap().children().len(), 2);

        let json = dir.path().join("page.json");
        std::fs::write(&json, r#"{"kind": "box"}"#).unwrap();
        assert_eq!(LayoutNode::load(&json).unwrap().kind(), NodeKind::Box);

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(LayoutNode::load(&missing), Err(LayoutError::Config { .. })));
    }
}
