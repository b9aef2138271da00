use std::ops::Range;

/// A fenced code block located in a Markdown document.
///
/// Built once by the parser and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// First token of the fence's info string, verbatim. May be empty.
    language: String,
    /// Body of the block. Every line ends with exactly one `\n`.
    content: String,
    /// 1-based line of the first content line.
    start_line: usize,
    /// 1-based line of the last content line (inclusive).
    end_line: usize,
    /// Byte span of the whole fenced construct, fences included.
    span: Range<usize>,
}

impl CodeBlock {
    pub(crate) fn new(
        language: String,
        content: String,
        start_line: usize,
        end_line: usize,
        span: Range<usize>,
    ) -> Self {
        CodeBlock {
            language,
            content,
            start_line,
            end_line,
            span,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn start_line(&self) -> usize {
        self.start_line
    }

    pub fn end_line(&self) -> usize {
        self.end_line
    }

    /// Byte span in source for error reporting.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Content lines without their terminating newlines.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.content.lines()
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }
}
