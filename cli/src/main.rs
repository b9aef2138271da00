mod selector;

use std::io::{self, IsTerminal, Read, Write};
use std::process;

use clap::Parser;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use executor::DispatchError;
use mdrun::CodeBlock;
use selector::Menu;

/// Source label used when the document comes from stdin.
const STDIN_LABEL: &str = "stdin";

#[derive(Parser)]
#[command(
    name = "mdrun",
    version,
    about = "Pick a fenced code block from a Markdown document and run it"
)]
struct Cli {
    /// Markdown file to read (stdin when omitted)
    file: Option<String>,

    /// Print the numbered list of code blocks and exit
    #[arg(long)]
    list: bool,

    /// Run block N (1-based) instead of prompting
    #[arg(short, long, value_name = "N", conflicts_with = "list")]
    block: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Error)]
enum InputError {
    #[error("cannot read '{path}': {source}")]
    File { path: String, source: io::Error },

    #[error("cannot read stdin: {0}")]
    Stdin(io::Error),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.no_color);

    let (label, source) = match read_source(cli.file.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let blocks = mdrun::extract(&source);
    debug!(count = blocks.len(), source = %label, "extracted code blocks");
    if blocks.is_empty() {
        eprintln!("error: no code blocks found in {}", label);
        process::exit(1);
    }

    let color = !cli.no_color && io::stdout().is_terminal();
    let menu = Menu::new(&blocks, &label).color(color);

    // --list: print the menu, run nothing
    if cli.list {
        let mut stdout = io::stdout().lock();
        if let Err(e) = menu.render(&mut stdout).and_then(|_| stdout.flush()) {
            eprintln!("error: {}", e);
            process::exit(1);
        }
        return;
    }

    let index = match cli.block {
        Some(position) => match menu.index_of(position) {
            Some(index) => index,
            None => {
                eprintln!(
                    "error: block {} is out of range (1-{})",
                    position,
                    blocks.len()
                );
                process::exit(1);
            }
        },
        None => {
            let selection = menu.select(&mut io::stdin().lock(), &mut io::stdout().lock());
            match selection {
                Ok(index) => index,
                Err(e) => {
                    eprintln!("error: {}", e);
                    process::exit(1);
                }
            }
        }
    };

    let block = &blocks[index];
    debug!(
        position = index + 1,
        language = block.language(),
        "running code block"
    );

    // Failures are reported, never turned into our own exit status.
    if let Err(error) = executor::execute(block) {
        let color_choice = if cli.no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        emit_dispatch_error(&label, &source, block, &error, color_choice);
    }
}

fn init_tracing(no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .init();
}

/// Read the whole document, returning its display label and text.
fn read_source(path: Option<&str>) -> Result<(String, String), InputError> {
    let bytes = match path {
        Some(path) => std::fs::read(path).map_err(|source| InputError::File {
            path: path.to_string(),
            source,
        })?,
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .map_err(InputError::Stdin)?;
            buf
        }
    };
    let label = path.unwrap_or(STDIN_LABEL).to_string();
    Ok((label, String::from_utf8_lossy(&bytes).into_owned()))
}

fn emit_dispatch_error(
    label: &str,
    source: &str,
    block: &CodeBlock,
    error: &DispatchError,
    color_choice: ColorChoice,
) {
    let mut files = SimpleFiles::new();
    let file_id = files.add(label, source);

    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    let diagnostic = error.to_diagnostic(file_id, block);
    let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
}
