use livedoc_editor::{ImageKind, NodeId, ProjectedNode};
use livedoc_parser::ROOT_TAG;
use serde::{Deserialize, Serialize};

/// Options for HTML rendering, the `render` section of `livedoc.config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Mark leaves with node ids and make text editable
    pub editable: bool,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            editable: false,
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context<'a> {
    options: &'a RenderOptions,
    depth: usize,
    inline: bool,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            depth: 0,
            inline: false,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn start_line(&mut self) {
        if self.is_block() {
            self.add_indent();
        }
    }

    fn end_line(&mut self) {
        if self.is_block() {
            self.add("\n");
        }
    }

    fn is_block(&self) -> bool {
        self.options.pretty && !self.inline
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn into_output(self) -> String {
        self.buffer
    }
}

/// Render one projected node and its subtree
pub fn render_html(node: &ProjectedNode, options: &RenderOptions) -> String {
    let mut ctx = Context::new(options);
    render_node(node, &mut ctx);
    ctx.into_output()
}

/// Render a whole document, unwrapping the parser's synthetic root
///
/// An empty document renders as an empty string.
pub fn render_fragment(root: Option<&ProjectedNode>, options: &RenderOptions) -> String {
    let mut ctx = Context::new(options);

    match root {
        None => {}
        Some(ProjectedNode::Element {
            tag_name, children, ..
        }) if tag_name == ROOT_TAG => {
            for child in children {
                render_node(child, &mut ctx);
            }
        }
        Some(node) => render_node(node, &mut ctx),
    }

    ctx.into_output()
}

fn render_node(node: &ProjectedNode, ctx: &mut Context) {
    match node {
        ProjectedNode::Text { id, value } => {
            ctx.start_line();
            render_text(id, value, ctx);
            ctx.end_line();
        }
        ProjectedNode::Image { id, src, alt, kind } => {
            ctx.start_line();
            if *kind == ImageKind::Picture {
                ctx.add("<picture>");
                render_img(id, src, alt, ctx);
                ctx.add("</picture>");
            } else {
                render_img(id, src, alt, ctx);
            }
            ctx.end_line();
        }
        ProjectedNode::Element {
            tag_name,
            attributes,
            children,
            ..
        } => render_element(tag_name, attributes, children, ctx),
    }
}

fn render_text(id: &NodeId, value: &str, ctx: &mut Context) {
    if ctx.options.editable {
        ctx.add("<span data-node-id=\"");
        ctx.add(&escape_html(id.as_str()));
        ctx.add("\" contenteditable=\"true\">");
        ctx.add(&escape_html(value));
        ctx.add("</span>");
    } else {
        ctx.add(&escape_html(value));
    }
}

fn render_img(id: &NodeId, src: &str, alt: &str, ctx: &mut Context) {
    ctx.add("<img");
    if ctx.options.editable {
        add_attribute("data-node-id", id.as_str(), ctx);
    }
    add_attribute("src", src, ctx);
    add_attribute("alt", alt, ctx);
    ctx.add(" />");
}

fn render_element(
    tag_name: &str,
    attributes: &[(String, String)],
    children: &[ProjectedNode],
    ctx: &mut Context,
) {
    ctx.start_line();
    ctx.add("<");
    ctx.add(tag_name);
    for (name, value) in attributes {
        add_attribute(name, value, ctx);
    }

    if children.is_empty() && is_self_closing(tag_name) {
        ctx.add(" />");
        ctx.end_line();
        return;
    }

    ctx.add(">");

    if ctx.is_block() && has_block_children(children) {
        ctx.add("\n");
        ctx.indent();
        for child in children {
            render_node(child, ctx);
        }
        ctx.dedent();
        ctx.add_indent();
    } else {
        let was_inline = ctx.inline;
        ctx.inline = true;
        for child in children {
            render_node(child, ctx);
        }
        ctx.inline = was_inline;
    }

    ctx.add("</");
    ctx.add(tag_name);
    ctx.add(">");
    ctx.end_line();
}

fn add_attribute(name: &str, value: &str, ctx: &mut Context) {
    ctx.add(" ");
    ctx.add(name);
    ctx.add("=\"");
    ctx.add(&escape_html(value));
    ctx.add("\"");
}

fn has_block_children(children: &[ProjectedNode]) -> bool {
    children
        .iter()
        .any(|child| !matches!(child, ProjectedNode::Text { .. }))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(id: &str, value: &str) -> ProjectedNode {
        ProjectedNode::Text {
            id: id.into(),
            value: value.to_string(),
        }
    }

    fn element(tag: &str, children: Vec<ProjectedNode>) -> ProjectedNode {
        ProjectedNode::Element {
            id: format!("e-{}", tag).into(),
            tag_name: tag.to_string(),
            attributes: Vec::new(),
            children,
        }
    }

    fn compact() -> RenderOptions {
        RenderOptions {
            pretty: false,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn test_escaping() {
        let node = ProjectedNode::Element {
            id: "1-1".into(),
            tag_name: "a".to_string(),
            attributes: vec![("title".to_string(), "\"quoted\" & <b>".to_string())],
            children: vec![text("1-2", "1 < 2 & 'x'")],
        };

        assert_eq!(
            render_html(&node, &compact()),
            r#"<a title="&quot;quoted&quot; &amp; &lt;b&gt;">1 &lt; 2 &amp; &#39;x&#39;</a>"#
        );
    }

    #[test]
    fn test_editable_marks_leaves() {
        let node = element(
            "div",
            vec![
                text("1-2", "Hi"),
                ProjectedNode::Image {
                    id: "1-3".into(),
                    src: "a.png".to_string(),
                    alt: "A".to_string(),
                    kind: ImageKind::Image,
                },
            ],
        );
        let options = RenderOptions {
            editable: true,
            ..compact()
        };

        assert_eq!(
            render_html(&node, &options),
            concat!(
                r#"<div><span data-node-id="1-2" contenteditable="true">Hi</span>"#,
                r#"<img data-node-id="1-3" src="a.png" alt="A" /></div>"#
            )
        );
    }

    #[test]
    fn test_picture_wraps_img() {
        let node = ProjectedNode::Image {
            id: "1-3".into(),
            src: "hero.jpg".to_string(),
            alt: "Hero".to_string(),
            kind: ImageKind::Picture,
        };

        assert_eq!(
            render_html(&node, &compact()),
            r#"<picture><img src="hero.jpg" alt="Hero" /></picture>"#
        );
    }

    #[test]
    fn test_pretty_print() {
        let node = element(
            "ul",
            vec![element("li", vec![text("1", "one")]), element("li", vec![])],
        );

        assert_eq!(
            render_html(&node, &RenderOptions::default()),
            "<ul>\n  <li>one</li>\n  <li></li>\n</ul>\n"
        );
    }

    #[test]
    fn test_void_element() {
        let node = element("p", vec![text("1", "a"), element("br", vec![]), text("2", "b")]);

        assert_eq!(render_html(&node, &compact()), "<p>a<br />b</p>");
    }

    #[test]
    fn test_fragment_unwraps_root() {
        let root = element(ROOT_TAG, vec![element("p", vec![text("1", "x")])]);

        assert_eq!(render_fragment(Some(&root), &compact()), "<p>x</p>");
        assert_eq!(render_fragment(None, &RenderOptions::default()), "");
    }

    #[test]
    fn test_options_from_json() {
        let options: RenderOptions = serde_json::from_str(r#"{"editable":true}"#).unwrap();
        assert!(options.editable);
        assert!(options.pretty);
        assert_eq!(options.indent, "  ");
    }
}
