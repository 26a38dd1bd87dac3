//! Markup tree and HTML serialization.
//!
//! Tags are always closed explicitly, including elements that HTML treats as
//! void: an image renders as `<img src="..." alt="..."></img>`.

use crate::block::Span;
use crate::error::RenderError;

/// Element attributes in insertion order.
pub type Attributes = Vec<(String, String)>;

/// A node in the rendered markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    /// Terminal content. A `tag` of `None` renders `value` verbatim.
    Leaf {
        tag: Option<String>,
        value: Option<String>,
        attributes: Attributes,
    },
    /// An element wrapping other nodes.
    Parent {
        tag: String,
        children: Option<Vec<MarkupNode>>,
        attributes: Attributes,
    },
}

impl MarkupNode {
    /// Untagged text.
    pub fn text(value: impl Into<String>) -> Self {
        MarkupNode::Leaf {
            tag: None,
            value: Some(value.into()),
            attributes: Vec::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        MarkupNode::Leaf {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: Vec::new(),
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<MarkupNode>) -> Self {
        MarkupNode::Parent {
            tag: tag.into(),
            children: Some(children),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, keeping earlier ones first.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            MarkupNode::Leaf { attributes, .. } | MarkupNode::Parent { attributes, .. } => {
                attributes.push((key.into(), value.into()));
            }
        }
        self
    }

    /// Children of a parent node; empty for leaves.
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Parent {
                children: Some(children),
                ..
            } => children,
            _ => &[],
        }
    }

    /// Serialize the subtree rooted at this node.
    pub fn to_html(&self) -> Result<String, RenderError> {
        let mut out = String::new();
        write_node(self, &mut out)?;
        Ok(out)
    }
}

impl From<Span> for MarkupNode {
    fn from(span: Span) -> Self {
        match span {
            Span::Plain(text) => MarkupNode::text(text),
            Span::Bold(text) => MarkupNode::leaf("b", text),
            Span::Italic(text) => MarkupNode::leaf("i", text),
            Span::Code(text) => MarkupNode::leaf("code", text),
            Span::Link { text, url } => MarkupNode::leaf("a", text).with_attribute("href", url),
            Span::Image { alt, url } => MarkupNode::leaf("img", "")
                .with_attribute("src", url)
                .with_attribute("alt", alt),
        }
    }
}

/// Render attributes as ` key="value"` pairs. No attributes renders nothing.
pub fn attributes_to_html(attributes: &[(String, String)]) -> String {
    let mut out = String::new();
    write_attributes(attributes, &mut out);
    out
}

fn write_attributes(attributes: &[(String, String)], out: &mut String) {
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}

fn write_node(node: &MarkupNode, out: &mut String) -> Result<(), RenderError> {
    match node {
        MarkupNode::Leaf {
            tag,
            value,
            attributes,
        } => {
            let value = value.as_deref().ok_or(RenderError::MissingValue)?;
            match tag {
                None => out.push_str(value),
                Some(tag) => {
                    open_tag(tag, attributes, out);
                    out.push_str(value);
                    close_tag(tag, out);
                }
            }
        }
        MarkupNode::Parent {
            tag,
            children,
            attributes,
        } => {
            if tag.is_empty() {
                return Err(RenderError::MissingTag);
            }
            let children = children.as_deref().ok_or(RenderError::MissingChildren)?;
            open_tag(tag, attributes, out);
            for child in children {
                write_node(child, out)?;
            }
            close_tag(tag, out);
        }
    }
    Ok(())
}

fn open_tag(tag: &str, attributes: &[(String, String)], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    write_attributes(attributes, out);
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
