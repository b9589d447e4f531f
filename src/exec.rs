//! External process execution with line-by-line stdout streaming.
//!
//! Consumption follows a drain-then-check contract: lines are yielded as
//! the process produces them, and a non-zero exit code is only reported
//! once the stream is exhausted. A consumer that fully drains the stream
//! has therefore seen all output before the failure surfaces.

use std::collections::HashMap;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tracing::info;

use crate::error::TransferError;

/// Starts an external process, streaming its stdout.
///
/// The child inherits this process's environment plus `env_overrides`.
/// Stderr is discarded; azcopy reports everything of interest on stdout.
/// The child is killed if the returned stream is dropped before exhaustion.
///
/// # Errors
///
/// Returns [`TransferError::Io`] when the process cannot be spawned.
pub fn run(
    argv: &[String],
    env_overrides: &HashMap<String, String>,
) -> Result<OutputLines, TransferError> {
    info!("executing command: {}", argv.join(" "));

    let (program, args) = argv
        .split_first()
        .ok_or_else(|| std::io::Error::other("empty command line"))?;

    let mut child = Command::new(program)
        .args(args)
        .envs(env_overrides)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("child stdout was not captured"))?;

    Ok(OutputLines {
        child,
        lines: BufReader::new(stdout).lines(),
        command: argv.to_vec(),
        finished: false,
    })
}

/// A forward-only, single-pass stream of a child process's stdout lines.
pub struct OutputLines {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    command: Vec<String>,
    finished: bool,
}

impl OutputLines {
    /// Pulls the next line of output, blocking until one is available.
    ///
    /// Returns `Ok(None)` once the process has terminated successfully;
    /// after that the stream is fused.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::ProcessExited`] when the drained process
    /// exited with a non-zero code, and [`TransferError::Io`] for read or
    /// wait failures.
    pub async fn next_line(&mut self) -> Result<Option<String>, TransferError> {
        if self.finished {
            return Ok(None);
        }

        if let Some(line) = self.lines.next_line().await? {
            return Ok(Some(line));
        }

        // End of output: wait for termination and inspect the exit code.
        self.finished = true;
        let status = self.child.wait().await?;
        if status.success() {
            Ok(None)
        } else {
            Err(TransferError::ProcessExited {
                code: status.code().unwrap_or(-1),
                command: self.command.clone(),
            })
        }
    }

    /// The command line this stream was started with.
    #[must_use]
    pub fn command(&self) -> &[String] {
        &self.command
    }
}
