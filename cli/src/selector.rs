use std::io::{self, BufRead, Write};

use mdrun::CodeBlock;
use thiserror::Error;

/// Content lines shown under each menu entry.
const PREVIEW_LINES: usize = 3;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("no code blocks to choose from")]
    Empty,

    #[error("no selection made: input ended")]
    EndOfInput,

    #[error("cannot read selection: {0}")]
    Io(#[from] io::Error),
}

/// Numbered listing of the blocks found in one document.
pub struct Menu<'a> {
    blocks: &'a [CodeBlock],
    label: &'a str,
    color: bool,
}

impl<'a> Menu<'a> {
    pub fn new(blocks: &'a [CodeBlock], label: &'a str) -> Self {
        Menu {
            blocks,
            label,
            color: false,
        }
    }

    /// Render entry headers in bold.
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Select a code block to execute:")?;
        for (i, block) in self.blocks.iter().enumerate() {
            let header = format!(
                "[{}] {}:{}:{} ({})",
                i + 1,
                self.label,
                block.start_line(),
                block.end_line(),
                block.language()
            );
            writeln!(out, "{}", bold(&header, self.color))?;
            for line in block.lines().take(PREVIEW_LINES) {
                writeln!(out, "{}", line)?;
            }
            if block.line_count() > PREVIEW_LINES {
                writeln!(out, "...")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Zero-based index for a 1-based menu position, if it names a block.
    pub fn index_of(&self, position: usize) -> Option<usize> {
        (1..=self.blocks.len())
            .contains(&position)
            .then(|| position - 1)
    }

    /// Interpret one line of user input as a menu position.
    pub fn parse_choice(&self, text: &str) -> Option<usize> {
        text.trim()
            .parse::<usize>()
            .ok()
            .and_then(|position| self.index_of(position))
    }

    /// Show the menu, then prompt until a valid position is entered.
    ///
    /// Returns the zero-based index of the chosen block. Invalid input is
    /// reported on `out` and asked for again, with no retry limit.
    pub fn select(
        &self,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> Result<usize, SelectError> {
        if self.blocks.is_empty() {
            return Err(SelectError::Empty);
        }

        self.render(out)?;

        let mut line = String::new();
        loop {
            write!(out, "Enter the number of the code block: ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Err(SelectError::EndOfInput);
            }

            if let Some(index) = self.parse_choice(&line) {
                return Ok(index);
            }
            writeln!(out, "Invalid selection, try again.")?;
        }
    }
}

fn bold(s: &str, color: bool) -> String {
    if color {
        format!("\x1b[1m{}\x1b[0m", s)
    } else {
        s.to_string()
    }
}
