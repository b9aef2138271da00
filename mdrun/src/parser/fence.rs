use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser as CmarkParser, Tag, TagEnd};
use tracing::{debug, trace};

use crate::block::CodeBlock;
use crate::parser::line_index::LineIndex;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Collect the fenced code blocks of `source` in document order.
///
/// pulldown-cmark's offset iterator is a pre-order walk of the document
/// tree, so container nesting (quotes, list items, footnotes) needs no
/// bookkeeping here: a fence is reported where its start tag appears.
pub(crate) fn extract_blocks(source: &str) -> Vec<CodeBlock> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let parser = CmarkParser::new_ext(source, options);
    let lines = LineIndex::new(source);

    let mut blocks = Vec::new();
    let mut open: Option<OpenFence> = None;

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                open = Some(OpenFence::new(&info, range));
            }
            // Indented blocks leave `open` empty, so their text is ignored.
            Event::Text(text) => {
                if let Some(fence) = open.as_mut() {
                    fence.push(&text, range);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                let Some(fence) = open.take() else {
                    continue;
                };
                let span = fence.span.clone();
                match fence.finish(&lines) {
                    Some(block) => {
                        debug!(
                            language = block.language(),
                            start_line = block.start_line(),
                            end_line = block.end_line(),
                            "extracted code block"
                        );
                        blocks.push(block);
                    }
                    None => trace!(?span, "skipping empty fenced code block"),
                }
            }
            _ => {}
        }
    }

    blocks
}

// ---------------------------------------------------------------------------
// Fence accumulation
// ---------------------------------------------------------------------------

/// A fenced block whose closing tag has not been seen yet.
struct OpenFence {
    language: String,
    text: String,
    /// Offset of the first content byte.
    first: Option<usize>,
    /// Offset of the last content byte.
    last: usize,
    span: Range<usize>,
}

impl OpenFence {
    fn new(info: &str, span: Range<usize>) -> Self {
        OpenFence {
            language: language_tag(info).to_string(),
            text: String::new(),
            first: None,
            last: span.start,
            span,
        }
    }

    fn push(&mut self, text: &str, range: Range<usize>) {
        if text.is_empty() {
            return;
        }
        if self.first.is_none() {
            self.first = Some(range.start);
        }
        self.last = range.end.saturating_sub(1).max(range.start);
        self.text.push_str(text);
    }

    /// Close the fence. `None` when it held no content lines.
    fn finish(self, lines: &LineIndex) -> Option<CodeBlock> {
        let first = self.first?;
        let content = normalize_lines(&self.text);
        if content.is_empty() {
            return None;
        }
        Some(CodeBlock::new(
            self.language,
            content,
            lines.line_of(first),
            lines.line_of(self.last),
            self.span,
        ))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// First whitespace-delimited token of a fence info string.
fn language_tag(info: &str) -> &str {
    info.split_whitespace().next().unwrap_or("")
}

/// Rebuild `text` so every line ends in a single `\n`.
///
/// Folds `\r\n` endings and terminates a trailing line left open by a fence
/// that runs to the end of the document.
fn normalize_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    for line in text.lines() {
        out.push_str(line);
        out.push('\n');
    }
    out
}
