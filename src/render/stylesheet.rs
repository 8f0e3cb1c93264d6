//! Stylesheet generation for layout trees.

use serde::Serialize;

use crate::breakpoint::BreakpointTable;
use crate::config::LayoutConfig;
use crate::context::{Layout, LayoutContext};
use crate::error::Result;
use crate::node::{LayoutNode, NodeKind};
use crate::style::{Declaration, ResolvedStyleBlock};

/// A layout node with its resolved style and generated class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledNode {
    /// Generated class name, `<prefix>-<n>` in depth-first order.
    pub class: String,
    pub kind: NodeKind,
    pub style: ResolvedStyleBlock,
    /// Nested CSS form of the block.
    pub css: String,
    /// The block scoped to `.<class>`, media rules hoisted.
    pub stylesheet: String,
    pub text: Option<String>,
    pub children: Vec<StyledNode>,
}

impl StyledNode {
    /// Iterates this node and its descendants depth-first.
    pub fn walk(&self) -> Vec<&StyledNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }

    pub fn selector(&self) -> String {
        format!(".{}", self.class)
    }
}

/// Resolved styles for a whole layout tree.
///
/// # Example
///
/// ```rust
/// use flexgrid::{LayoutConfig, LayoutNode, Stylesheet};
///
/// let tree = LayoutNode::from_yaml("kind: flex\nchildren:\n  - kind: box\n").unwrap();
/// let sheet = Stylesheet::build(&tree, &LayoutConfig::default()).unwrap();
///
/// assert_eq!(sheet.root().class, "fg-0");
/// assert_eq!(sheet.root().children[0].class, "fg-1");
/// assert!(sheet.css().contains(".fg-1 {\n  box-sizing: border-box;\n  order: 1;"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stylesheet {
    breakpoints: BreakpointTable,
    root: StyledNode,
}

impl Stylesheet {
    /// Resolves every node of `root`, each against the context its parent
    /// hands down. The root gets [`LayoutConfig::root_context`].
    pub fn build(root: &LayoutNode, config: &LayoutConfig) -> Result<Self> {
        let ctx = config.root_context();
        let mut counter = 0usize;
        let root = style_node(root, &ctx, &config.class_prefix, &mut counter)?;
        tracing::debug!(nodes = counter, prefix = %config.class_prefix, "built stylesheet");
        Ok(Self {
            breakpoints: config.breakpoints.clone(),
            root,
        })
    }

    pub fn root(&self) -> &StyledNode {
        &self.root
    }

    pub fn breakpoints(&self) -> &BreakpointTable {
        &self.breakpoints
    }

    /// All nodes in depth-first order.
    pub fn nodes(&self) -> Vec<&StyledNode> {
        self.root.walk()
    }

    /// The complete stylesheet, one scoped block per node.
    pub fn css(&self) -> String {
        self.nodes()
            .into_iter()
            .map(|node| node.stylesheet.as_str())
            .collect()
    }

    /// Evaluates every node's cascade at a viewport width.
    pub fn computed_at(&self, width: u32) -> Vec<(&str, Vec<Declaration>)> {
        self.nodes()
            .into_iter()
            .map(|node| (node.class.as_str(), node.style.computed_at(width)))
            .collect()
    }
}

fn style_node(
    node: &LayoutNode,
    ctx: &LayoutContext,
    prefix: &str,
    counter: &mut usize,
) -> Result<StyledNode> {
    let class = format!("{}-{}", prefix, counter);
    *counter += 1;

    let style = node.style(ctx)?;
    tracing::debug!(
        class = %class,
        kind = node.kind().as_str(),
        rules = style.rules().len(),
        "resolved node style"
    );

    let child_ctx = node.child_context(ctx);
    let children = node
        .children()
        .iter()
        .map(|child| style_node(child, &child_ctx, prefix, counter))
        .collect::<Result<Vec<_>>>()?;

    Ok(StyledNode {
        css: style.to_string(),
        stylesheet: style.to_stylesheet(&format!(".{}", class)),
        class,
        kind: node.kind(),
        style,
        text: node.text().map(str::to_string),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::resolve::UnknownBreakpointPolicy;

    const PAGE: &str = r#"
kind: grid
props:
  columns: [1fr, 3fr]
  columns-phone: 1fr
children:
  - kind: box
    props: { column: [1, 2] }
    text: Nav
  - kind: flex
    props: { useGrid: true }
    children:
      - kind: box
        props: { col: 6, col-phone: 12 }
      - kind: box
        props: { show-phone: true }
"#;

    #[test]
    fn test_classes_depth_first() {
        let tree = LayoutNode::from_yaml(PAGE).unwrap();
        let sheet = Stylesheet::build(&tree, &LayoutConfig::default()).unwrap();
        let classes: Vec<&str> = sheet.nodes().iter().map(|n| n.class.as_str()).collect();
        assert_eq!(classes, ["fg-0", "fg-1", "fg-2", "fg-3", "fg-4"]);
    }

    #[test]
    fn test_context_flows_through_tree() {
        let tree = LayoutNode::from_yaml(PAGE).unwrap();
        let sheet = Stylesheet::build(&tree, &LayoutConfig::default()).unwrap();
        let nodes = sheet.nodes();

        assert_eq!(nodes[1].style.base_value("grid-column"), Some("1 / 2"));
        assert_eq!(nodes[3].style.base_value("width"), Some("50%"));
        assert_eq!(nodes[3].style.value_at("width", 500).as_deref(), Some("100%"));
        assert_eq!(nodes[4].style.value_at("display", 500).as_deref(), Some("block"));
    }

    #[test]
    fn test_css_output() {
        let tree = LayoutNode::from_yaml(PAGE).unwrap();
        let config = LayoutConfig {
            class_prefix: "page".to_string(),
            ..LayoutConfig::default()
        };
        let css = Stylesheet::build(&tree, &config).unwrap().css();
        assert!(css.starts_with(".page-0 {\n  display: grid;\n  grid-template-columns: 1fr 3fr;\n"));
        assert!(css.contains(
            "@media (max-width: 576px) {\n  .page-0 {\n    grid-template-columns: 1fr;\n  }\n}\n"
        ));
    }

    #[test]
    fn test_computed_at() {
        let tree = LayoutNode::from_yaml(PAGE).unwrap();
        let sheet = Stylesheet::build(&tree, &LayoutConfig::default()).unwrap();
        let computed = sheet.computed_at(400);
        let (class, decls) = &computed[0];
        assert_eq!(*class, "fg-0");
        assert!(decls.contains(&Declaration::new("grid-template-columns", "1fr")));
    }

    #[test]
    fn test_config_policy_applies() {
        let tree = LayoutNode::from_yaml("kind: box\nprops: { hidden-watch: true }\n").unwrap();
        let config = LayoutConfig {
            unknown_breakpoints: UnknownBreakpointPolicy::Error,
            ..LayoutConfig::default()
        };
        let err = Stylesheet::build(&tree, &config).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownBreakpoint { .. }));
    }

    #[test]
    fn test_build_is_deterministic() {
        let tree = LayoutNode::from_yaml(PAGE).unwrap();
        let config = LayoutConfig::default();
        let first = Stylesheet::build(&tree, &config).unwrap().css();
        let second = Stylesheet::build(&tree, &config).unwrap().css();
        assert_eq!(first, second);
    }
}
