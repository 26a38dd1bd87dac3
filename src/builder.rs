use crate::block::BlockType;
use crate::error::{Error, FormatError};
use crate::html::MarkupNode;
use crate::inline::tokenize;
use crate::parser::{classify, split_blocks};

/// Convert a whole document into a `div` holding one subtree per block.
pub fn build_document(markdown: &str) -> Result<MarkupNode, Error> {
    let children = split_blocks(markdown)
        .into_iter()
        .map(|block| build_block(block, classify(block)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MarkupNode::parent("div", children))
}

/// Build the subtree for a single classified block.
pub fn build_block(block: &str, block_type: BlockType) -> Result<MarkupNode, FormatError> {
    match block_type {
        BlockType::Paragraph => paragraph(block),
        BlockType::Heading(_) => heading(block),
        BlockType::Code => Ok(code(block)),
        BlockType::Quote => quote(block),
        BlockType::UnorderedList => unordered_list(block),
        BlockType::OrderedList => ordered_list(block),
    }
}

fn text_to_children(text: &str) -> Result<Vec<MarkupNode>, FormatError> {
    Ok(tokenize(text)?.into_iter().map(MarkupNode::from).collect())
}

fn paragraph(block: &str) -> Result<MarkupNode, FormatError> {
    let text = block.split('\n').collect::<Vec<_>>().join(" ");
    Ok(MarkupNode::parent("p", text_to_children(&text)?))
}

fn heading(block: &str) -> Result<MarkupNode, FormatError> {
    let level = block.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return Err(FormatError::InvalidHeadingLevel { level });
    }
    // Hashes and the single space after them.
    let text = block.get(level + 1..).unwrap_or_default();
    Ok(MarkupNode::parent(format!("h{level}"), text_to_children(text)?))
}

fn code(block: &str) -> MarkupNode {
    let inner = block
        .get(3..block.len().saturating_sub(3))
        .unwrap_or_default();
    let inner = inner.strip_prefix('\n').unwrap_or(inner);
    MarkupNode::parent("pre", vec![MarkupNode::leaf("code", inner)])
}

fn quote(block: &str) -> Result<MarkupNode, FormatError> {
    let mut lines = Vec::new();
    for line in block.split('\n') {
        if !line.starts_with('>') {
            return Err(FormatError::InvalidQuoteLine {
                line: line.to_owned(),
            });
        }
        lines.push(line.trim_start_matches('>').trim());
    }
    Ok(MarkupNode::parent("blockquote", text_to_children(&lines.join(" "))?))
}

fn unordered_list(block: &str) -> Result<MarkupNode, FormatError> {
    let items = block
        .split('\n')
        .map(|line| list_item(line.get(2..).unwrap_or_default()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MarkupNode::parent("ul", items))
}

fn ordered_list(block: &str) -> Result<MarkupNode, FormatError> {
    let items = block
        .split('\n')
        .map(|line| list_item(line.split_once(". ").map_or("", |(_, text)| text)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MarkupNode::parent("ol", items))
}

fn list_item(text: &str) -> Result<MarkupNode, FormatError> {
    Ok(MarkupNode::parent("li", text_to_children(text)?))
}
