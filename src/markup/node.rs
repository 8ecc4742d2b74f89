//! Node: The element tree a component renders into.

use std::fmt::{self, Write};

/// A renderable fragment.
///
/// Nodes are plain data: a render produces a new tree, and surfaces decide
/// how to display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with a tag and child nodes.
    Element {
        /// Element tag name (e.g. `"div"`).
        tag: String,
        /// Child nodes in document order.
        children: Vec<Node>,
    },
    /// A run of text.
    Text(String),
    /// A sequence of sibling nodes without a wrapper.
    Fragment(Vec<Node>),
}

impl Node {
    /// Create an element node.
    pub fn element(tag: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Element {
            tag: tag.into(),
            children,
        }
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create an empty fragment.
    pub const fn empty() -> Self {
        Self::Fragment(Vec::new())
    }

    /// Child nodes of an element or fragment. Text has none.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Element { children, .. } | Self::Fragment(children) => children,
            Self::Text(_) => &[],
        }
    }

    /// Tag name, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element { children, .. } | Self::Fragment(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Serialize to markup text with `&`, `<`, `>` and `"` escaped.
    pub fn to_markup(&self) -> String {
        self.to_string()
    }

    fn write_markup(&self, out: &mut impl Write) -> fmt::Result {
        match self {
            Self::Text(text) => write_escaped(out, text),
            Self::Fragment(children) => {
                for child in children {
                    child.write_markup(out)?;
                }
                Ok(())
            }
            Self::Element { tag, children } => {
                write!(out, "<{tag}>")?;
                for child in children {
                    child.write_markup(out)?;
                }
                write!(out, "</{tag}>")
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_markup(f)
    }
}

fn write_escaped(out: &mut impl Write, text: &str) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            _ => out.write_char(ch)?,
        }
    }
    Ok(())
}

/// Check whether `tag` can be used as an element name.
///
/// Accepts a leading ASCII letter followed by ASCII alphanumerics or `-`.
pub fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_markup() {
        let tree = Node::element(
            "div",
            vec![
                Node::element("li", vec![Node::text("a")]),
                Node::element("li", vec![Node::text("b")]),
            ],
        );
        assert_eq!(tree.to_markup(), "<div><li>a</li><li>b</li></div>");
        assert_eq!(tree.text_content(), "ab");
        assert_eq!(tree.children().len(), 2);
    }

    #[test]
    fn test_node_escaping() {
        let node = Node::text("<b> & \"q\"");
        assert_eq!(node.to_markup(), "&lt;b&gt; &amp; &quot;q&quot;");
        assert_eq!(node.text_content(), "<b> & \"q\"");
    }

    #[test]
    fn test_fragment_has_no_wrapper() {
        let node = Node::Fragment(vec![Node::text("x"), Node::text("y")]);
        assert_eq!(node.to_markup(), "xy");
        assert_eq!(node.tag(), None);
        assert_eq!(Node::empty().to_markup(), "");
    }

    #[test]
    fn test_valid_tags() {
        assert!(is_valid_tag("div"));
        assert!(is_valid_tag("my-item2"));
        assert!(!is_valid_tag(""));
        assert!(!is_valid_tag("2div"));
        assert!(!is_valid_tag("a b"));
        assert!(!is_valid_tag("<p>"));
    }
}
