mod fence;
mod line_index;

pub use line_index::LineIndex;

use crate::block::CodeBlock;

/// Parser entry point.
pub struct Parser<'a> {
    source: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser { source }
    }

    /// Walk the parsed document and collect its fenced code blocks.
    ///
    /// Blocks come back in document order, including those nested inside
    /// block quotes, list items and footnote definitions. Fences with no
    /// content lines are skipped. A document without fences yields an
    /// empty vector.
    pub fn extract(&self) -> Vec<CodeBlock> {
        fence::extract_blocks(self.source)
    }
}
