mod assets;
mod block;
mod builder;
mod config;
mod error;
mod html;
mod inline;
mod page;
mod parser;

pub use assets::copy_static;
pub use block::{BlockType, Span};
pub use builder::{build_block, build_document};
pub use config::{Config, ConfigError, SiteConfig, TemplateConfig};
pub use error::{Error, FormatError, PageError, RenderError};
pub use html::{Attributes, MarkupNode, attributes_to_html};
pub use inline::{split_delimiter, tokenize};
pub use page::{extract_title, generate_page, generate_pages_recursive, render_page};
pub use parser::{classify, split_blocks};

/// Parse markdown into a markup tree rooted at a `div`.
pub fn convert(markdown: &str) -> Result<MarkupNode, Error> {
    builder::build_document(markdown)
}

/// Convert markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> Result<String, Error> {
    Ok(convert(markdown)?.to_html()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn title_and_bold_paragraph() {
        let root = convert("# Title\n\nHello **world**").unwrap();
        assert_eq!(
            root,
            MarkupNode::parent(
                "div",
                vec![
                    MarkupNode::parent("h1", vec![MarkupNode::text("Title")]),
                    MarkupNode::parent(
                        "p",
                        vec![MarkupNode::text("Hello "), MarkupNode::leaf("b", "world")]
                    ),
                ]
            )
        );
    }

    #[test]
    fn code_fence_keeps_markers() {
        let root = convert("```\ncode *here*\n```").unwrap();
        assert_eq!(
            root.children(),
            &[MarkupNode::parent(
                "pre",
                vec![MarkupNode::leaf("code", "code *here*\n")]
            )]
        );
    }

    #[test]
    fn whitespace_only_is_empty_div() {
        let root = convert("  \n\n \t ").unwrap();
        assert!(root.children().is_empty());
        assert_eq!(root.to_html().unwrap(), "<div></div>");
    }

    #[test]
    fn markdown_to_html_reports_format_errors() {
        assert_eq!(
            markdown_to_html("a `b"),
            Err(Error::Format(FormatError::UnterminatedDelimiter {
                delimiter: "`"
            }))
        );
    }
}
