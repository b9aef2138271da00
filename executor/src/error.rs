use std::io;
use std::process::ExitStatus;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};
use mdrun::CodeBlock;
use thiserror::Error;

use crate::language::supported_languages;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unsupported language: {}", display_language(.0))]
    UnsupportedLanguage(String),

    #[error("failed to start `{program}`: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("failed to write script to `{program}`: {source}")]
    Stdin { program: String, source: io::Error },

    #[error("failed waiting for `{program}`: {source}")]
    Wait { program: String, source: io::Error },

    #[error("`{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

impl DispatchError {
    /// Unsupported languages are skipped, not failed.
    pub fn is_warning(&self) -> bool {
        matches!(self, DispatchError::UnsupportedLanguage(_))
    }

    /// Convert to a codespan-reporting Diagnostic pointing at `block`.
    pub fn to_diagnostic(&self, file_id: usize, block: &CodeBlock) -> Diagnostic<usize> {
        let (severity, label) = match self {
            DispatchError::UnsupportedLanguage(_) => {
                (Severity::Warning, "no interpreter for this block")
            }
            DispatchError::Failed { .. } => (Severity::Error, "this block failed"),
            _ => (Severity::Error, "while running this block"),
        };

        let diagnostic = Diagnostic::new(severity)
            .with_message(self.to_string())
            .with_labels(vec![
                Label::primary(file_id, block.span()).with_message(label),
            ]);

        if self.is_warning() {
            diagnostic.with_notes(vec![format!(
                "supported languages: {}",
                supported_languages().join(", ")
            )])
        } else {
            diagnostic
        }
    }
}

fn display_language(language: &str) -> &str {
    if language.is_empty() { "(none)" } else { language }
}
