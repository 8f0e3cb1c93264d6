//! MiniJinja filter registration.

use minijinja::{Environment, Error, ErrorKind, Value};

/// Registers the document filters on a minijinja environment.
pub(crate) fn register_filters(env: &mut Environment<'static>) {
    // Formats a pixel length: {{ 576 | px }} -> 576px
    env.add_filter("px", |value: Value| -> Result<String, Error> {
        match i64::try_from(value.clone()) {
            Ok(n) => Ok(format!("{}px", n)),
            Err(_) => Err(Error::new(
                ErrorKind::InvalidOperation,
                format!("px filter expects an integer, got {}", value.kind()),
            )),
        }
    });

    // Wraps declarations in a rule for the given selector, one per line:
    // {{ "width: 50%;" | css_block(".item") }} -> .item {\n  width: 50%;\n}
    env.add_filter("css_block", |value: Value, selector: String| -> String {
        let body = value.to_string();
        let mut out = format!("{} {{\n", selector);
        for line in body.lines().filter(|line| !line.trim().is_empty()) {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('}');
        out
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str) -> Result<String, Error> {
        let mut env = Environment::new();
        register_filters(&mut env);
        env.render_str(source, ())
    }

    #[test]
    fn test_px_filter() {
        assert_eq!(render("{{ 576 | px }}").unwrap(), "576px");
        assert!(render("{{ 'wide' | px }}").is_err());
    }

    #[test]
    fn test_css_block_filter() {
        let out = render(r#"{{ "display: none;\norder: 1;\n" | css_block(".fg-0") }}"#).unwrap();
        assert_eq!(out, ".fg-0 {\n  display: none;\n  order: 1;\n}");
    }
}
