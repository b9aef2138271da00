use std::io::{self, Write};
use std::process::{Child, Command, ExitStatus, Stdio};

use mdrun::CodeBlock;
use tracing::debug;

use crate::error::DispatchError;
use crate::language::interpreter_for;

/// A script ready to be fed to an interpreter program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    program: &'a str,
    script: &'a str,
}

impl<'a> Invocation<'a> {
    pub fn new(program: &'a str, script: &'a str) -> Self {
        Invocation { program, script }
    }

    pub fn program(&self) -> &'a str {
        self.program
    }

    pub fn script(&self) -> &'a str {
        self.script
    }

    /// Run with the child's stdout and stderr attached to ours.
    pub fn run(&self) -> Result<ExitStatus, DispatchError> {
        self.run_with(Stdio::inherit(), Stdio::inherit())
    }

    /// Spawn the program without arguments, hand it the whole script on
    /// stdin, then wait for it.
    ///
    /// The child is reaped before this returns, whether or not writing its
    /// input succeeded. A non-zero exit is reported as
    /// [`DispatchError::Failed`].
    pub fn run_with(
        &self,
        stdout: impl Into<Stdio>,
        stderr: impl Into<Stdio>,
    ) -> Result<ExitStatus, DispatchError> {
        debug!(
            program = self.program,
            bytes = self.script.len(),
            "spawning interpreter"
        );

        let mut child = Command::new(self.program)
            .stdin(Stdio::piped())
            .stdout(stdout)
            .stderr(stderr)
            .spawn()
            .map_err(|source| DispatchError::Spawn {
                program: self.program.to_string(),
                source,
            })?;

        let fed = feed(&mut child, self.script);

        let status = child.wait().map_err(|source| DispatchError::Wait {
            program: self.program.to_string(),
            source,
        })?;
        debug!(program = self.program, %status, "interpreter exited");

        fed.map_err(|source| DispatchError::Stdin {
            program: self.program.to_string(),
            source,
        })?;

        if status.success() {
            Ok(status)
        } else {
            Err(DispatchError::Failed {
                program: self.program.to_string(),
                status,
            })
        }
    }
}

/// Write the script and close the pipe so the interpreter sees end of input.
///
/// An interpreter that exits without reading everything closes its end
/// first; that is left to its exit status to judge.
fn feed(child: &mut Child, script: &str) -> io::Result<()> {
    let Some(mut stdin) = child.stdin.take() else {
        return Ok(());
    };
    match stdin.write_all(script.as_bytes()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Map a block to the interpreter that runs it.
pub fn resolve(block: &CodeBlock) -> Result<Invocation<'_>, DispatchError> {
    let program = interpreter_for(block.language())
        .ok_or_else(|| DispatchError::UnsupportedLanguage(block.language().to_string()))?;
    Ok(Invocation::new(program, block.content()))
}

/// Run `block` through its interpreter, sharing our stdout and stderr.
///
/// Nothing is spawned for an unsupported language.
pub fn execute(block: &CodeBlock) -> Result<ExitStatus, DispatchError> {
    resolve(block)?.run()
}
