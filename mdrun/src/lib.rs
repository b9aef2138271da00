pub mod block;
pub mod parser;

pub use block::CodeBlock;
pub use parser::Parser;

/// Extract every fenced code block from `source`, in document order.
///
/// Shorthand for `Parser::new(source).extract()`.
pub fn extract(source: &str) -> Vec<CodeBlock> {
    Parser::new(source).extract()
}
