use std::sync::LazyLock;

use regex::Regex;

use crate::block::BlockType;

static HEADING_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6} ").unwrap());

// ASCII digits only: `\d` would also accept other scripts' digits, which
// `usize::from_str` rejects.
static ORDERED_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\. ").unwrap());

/// Split a document into trimmed, non-empty blocks separated by blank lines.
pub fn split_blocks(markdown: &str) -> Vec<&str> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Decide the structural type of a single trimmed block.
///
/// Rules are tried in order and the first match wins: heading, code, quote,
/// unordered list, ordered list. Anything else is a paragraph.
pub fn classify(block: &str) -> BlockType {
    if HEADING_PATTERN.is_match(block) {
        return BlockType::Heading(heading_level(block));
    }

    if block.starts_with("```") && block.ends_with("```") {
        return BlockType::Code;
    }

    if block.split('\n').all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }

    if block.split('\n').all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }

    if is_ordered_list(block) {
        return BlockType::OrderedList;
    }

    BlockType::Paragraph
}

/// Number of leading `#` characters.
pub(crate) fn heading_level(block: &str) -> u8 {
    let count = block.bytes().take_while(|&b| b == b'#').count();
    u8::try_from(count).unwrap_or(u8::MAX)
}

/// Every line is `N. ` and the numbers run 1, 2, 3, ... without gaps.
fn is_ordered_list(block: &str) -> bool {
    let mut expected: usize = 1;
    for line in block.split('\n') {
        let Some(caps) = ORDERED_ITEM_PATTERN.captures(line) else {
            return false;
        };
        match caps[1].parse::<usize>() {
            Ok(n) if n == expected => expected += 1,
            _ => return false,
        }
    }
    true
}
