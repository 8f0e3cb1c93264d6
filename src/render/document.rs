//! HTML document rendering.

use minijinja::Environment;
use serde::Serialize;

use super::filters::register_filters;
use super::stylesheet::{StyledNode, Stylesheet};
use crate::breakpoint::Breakpoint;
use crate::error::Result;

/// Template name; the `.html` suffix turns on HTML auto-escaping.
const TEMPLATE_NAME: &str = "document.html";

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ title }}</title>
<style>
/* breakpoints:{% for bp in breakpoints %} {{ bp.name }} {{ bp.max_width | px }}{% endfor %} */
{{ stylesheet | safe }}</style>
</head>
<body>
{% for node in [root] recursive -%}
<div class="{{ node.class }}">
{%- if node.text %}{{ node.text }}{% endif %}
{%- if node.children %}
{{ loop(node.children) }}{% endif %}</div>
{% endfor -%}
</body>
</html>
"#;

#[derive(Serialize)]
struct DocumentData<'a> {
    title: &'a str,
    stylesheet: String,
    breakpoints: Vec<&'a Breakpoint>,
    root: &'a StyledNode,
}

/// Renders a [`Stylesheet`] into an HTML page.
///
/// Templates receive `title`, `stylesheet` (the full CSS), `breakpoints`
/// (widest first) and `root`, the styled tree. Each node exposes `class`,
/// `kind`, `css`, `stylesheet`, `text` and `children`. Text is escaped.
///
/// # Example
///
/// ```rust
/// use flexgrid::{DocumentRenderer, LayoutConfig, LayoutNode, Stylesheet};
///
/// let tree = LayoutNode::from_yaml("kind: box\ntext: Hello\n").unwrap();
/// let sheet = Stylesheet::build(&tree, &LayoutConfig::default()).unwrap();
///
/// let html = DocumentRenderer::new().unwrap().render(&sheet, "Demo").unwrap();
/// assert!(html.contains(r#"<div class="fg-0">Hello</div>"#));
/// ```
pub struct DocumentRenderer {
    env: Environment<'static>,
}

impl DocumentRenderer {
    /// Creates a renderer with the built-in template.
    pub fn new() -> Result<Self> {
        Self::with_template(DEFAULT_TEMPLATE)
    }

    /// Creates a renderer with a custom template.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Render`](crate::LayoutError::Render) if the
    /// template does not compile.
    pub fn with_template(source: &str) -> Result<Self> {
        let mut env = Environment::new();
        register_filters(&mut env);
        env.add_template_owned(TEMPLATE_NAME.to_string(), source.to_string())?;
        Ok(Self { env })
    }

    /// Renders the document for a stylesheet.
    pub fn render(&self, sheet: &Stylesheet, title: &str) -> Result<String> {
        let data = DocumentData {
            title,
            stylesheet: sheet.css(),
            breakpoints: sheet.breakpoints().descending().collect(),
            root: sheet.root(),
        };
        let tmpl = self.env.get_template(TEMPLATE_NAME)?;
        Ok(tmpl.render(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::error::LayoutError;
    use crate::node::LayoutNode;

    fn sheet(yaml: &str) -> Stylesheet {
        Stylesheet::build(&LayoutNode::from_yaml(yaml).unwrap(), &LayoutConfig::default()).unwrap()
    }

    #[test]
    fn test_default_document() {
        let sheet = sheet("kind: flex\nchildren:\n  - kind: box\n    text: One\n  - kind: box\n    text: Two\n");
        let html = DocumentRenderer::new().unwrap().render(&sheet, "Page").unwrap();

        assert!(html.contains("<title>Page</title>"));
        assert!(html.contains(".fg-0 {\n  display: flex;"));
        assert!(html.contains(r#"<div class="fg-1">One</div>"#));
        assert!(html.contains(r#"<div class="fg-2">Two</div>"#));
        assert!(html.contains("desktop 1200px laptop 992px tablet 768px phone 576px"));
    }

    #[test]
    fn test_children_nested_in_parent() {
        let sheet = sheet("kind: grid\nchildren:\n  - kind: box\n    text: Cell\n");
        let html = DocumentRenderer::new().unwrap().render(&sheet, "t").unwrap();
        let outer = html.find(r#"<div class="fg-0">"#).unwrap();
        let inner = html.find(r#"<div class="fg-1">Cell</div>"#).unwrap();
        assert!(outer < inner);
        assert!(html[inner..].starts_with("<div class=\"fg-1\">Cell</div>\n</div>\n"));
    }

    #[test]
    fn test_text_is_escaped() {
        let sheet = sheet("kind: box\ntext: '<b>bold & more'\n");
        let html = DocumentRenderer::new().unwrap().render(&sheet, "<t>").unwrap();
        assert!(html.contains("&lt;b&gt;bold &amp; more"));
        assert!(html.contains("<title>&lt;t&gt;</title>"));
    }

    #[test]
    fn test_custom_template() {
        let sheet = sheet("kind: box\nprops: { order: 3 }\n");
        let renderer = DocumentRenderer::with_template(
            "{% for node in [root] %}{{ node.css | css_block('.' ~ node.class) }}{% endfor %}",
        )
        .unwrap();
        let out = renderer.render(&sheet, "").unwrap();
        assert_eq!(out, ".fg-0 {\n  box-sizing: border-box;\n}");
    }

    #[test]
    fn test_bad_template_is_render_error() {
        let err = DocumentRenderer::with_template("{% for %}").err().unwrap();
        assert!(matches!(err, LayoutError::Render { .. }));
    }
}
