//! The transfer orchestrator: builds azcopy command lines, drains the
//! process output through the job-status parser, and applies the terminal
//! status rule to the finished record.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::TransferError;
use crate::exec;
use crate::job::{CopyJobInfo, SyncJobInfo};
use crate::location::Location;
use crate::options::{CopyOptions, SyncOptions};
use crate::parse::JobStatusParser;
use crate::sas;

/// Environment variable azcopy reads for its job plan directory.
const JOB_PLAN_ENV: &str = "AZCOPY_JOB_PLAN_LOCATION";

/// Environment variable azcopy reads for its log directory.
const LOG_ENV: &str = "AZCOPY_LOG_LOCATION";

/// Terminal statuses that count as full success.
const SUCCESS_STATUSES: &[&str] = &["Completed", "CompletedWithSkipped"];

/// Client that drives an azcopy binary.
///
/// Uses whatever `azcopy` is on the `PATH` by default; point `exe` at a
/// specific binary to use another one.
#[derive(Clone, Debug)]
pub struct AzClient {
    /// The azcopy executable to invoke.
    exe: String,

    /// Directory for azcopy's job plan and log files, created on demand.
    artefact_dir: Option<PathBuf>,
}

impl Default for AzClient {
    fn default() -> Self {
        Self::new("azcopy")
    }
}

impl AzClient {
    /// Creates a client around the given azcopy executable.
    #[must_use]
    pub fn new(exe: impl Into<String>) -> Self {
        Self {
            exe: exe.into(),
            artefact_dir: None,
        }
    }

    /// Stores azcopy's job plan and log files under the given directory.
    #[must_use]
    pub fn with_artefact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artefact_dir = Some(dir.into());
        self
    }

    /// Environment overrides for the child process.
    fn job_env(&self) -> Result<HashMap<String, String>, TransferError> {
        let mut env = HashMap::new();
        if let Some(dir) = &self.artefact_dir {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
            env.insert(
                JOB_PLAN_ENV.to_string(),
                dir.join("jobs").to_string_lossy().into_owned(),
            );
            env.insert(
                LOG_ENV.to_string(),
                dir.join("logs").to_string_lossy().into_owned(),
            );
        }
        Ok(env)
    }

    /// Copies data from `src` to `dest` with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::SameLocationKind`] when both endpoints are
    /// the same kind, and [`TransferError::CopyIncomplete`] (carrying the
    /// partial record) when the job did not end in full success.
    pub async fn copy(
        &self,
        src: &Location,
        dest: &Location,
        options: &CopyOptions,
    ) -> Result<CopyJobInfo, TransferError> {
        // Wildcards only behave when the endpoints are of different kinds.
        if src.kind() == dest.kind() {
            return Err(TransferError::SameLocationKind);
        }

        let argv = self.build_argv("cp", src, dest, options.to_args());
        let (parser, failure) = self.drain(&argv, JobStatusParser::copy()).await?;
        let mut job = parser.finish_copy();

        if let Some(error) = failure {
            job.error_message = classify_failure(src, dest, &error);
            job.completed = false;
        }

        // Success is gated solely on the terminal status string.
        if SUCCESS_STATUSES.contains(&job.final_status.as_str()) {
            job.completed = true;
            return Ok(job);
        }

        if job.transfers_failed > 0 {
            job.error_message
                .push_str(&format!("; transfers failed = {}", job.transfers_failed));
        } else {
            job.error_message.push_str("; error while transferring data");
        }
        job.completed = false;

        Err(TransferError::CopyIncomplete {
            message: job.error_message.clone(),
            job: Box::new(job),
        })
    }

    /// Synchronizes `src` with `dest` using the given options.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::LocalPathNotFound`] when a local endpoint
    /// does not exist on disk, and [`TransferError::SyncIncomplete`]
    /// (carrying the partial record) when the job did not end in full
    /// success.
    pub async fn sync(
        &self,
        src: &Location,
        dest: &Location,
        options: &SyncOptions,
    ) -> Result<SyncJobInfo, TransferError> {
        // azcopy sync requires the local side to already exist.
        for location in [src, dest] {
            if let Some(path) = location.local_path()
                && !path.exists()
            {
                return Err(TransferError::LocalPathNotFound(path.to_path_buf()));
            }
        }

        let argv = self.build_argv("sync", src, dest, options.to_args());
        let (parser, failure) = self.drain(&argv, JobStatusParser::sync()).await?;
        let mut job = parser.finish_sync();

        if let Some(error) = failure {
            job.error_message = classify_failure(src, dest, &error);
            job.completed = false;
        }

        if SUCCESS_STATUSES.contains(&job.final_status.as_str()) {
            job.completed = true;
            return Ok(job);
        }

        if job.copy_transfers_failed > 0 {
            job.error_message.push_str(&format!(
                "; transfers failed = {}",
                job.copy_transfers_failed
            ));
        } else {
            job.error_message.push_str("; error while transferring data");
        }
        job.completed = false;

        Err(TransferError::SyncIncomplete {
            message: job.error_message.clone(),
            job: Box::new(job),
        })
    }

    fn build_argv(
        &self,
        subcommand: &str,
        src: &Location,
        dest: &Location,
        option_args: Vec<String>,
    ) -> Vec<String> {
        let mut argv = vec![
            self.exe.clone(),
            subcommand.to_string(),
            src.to_string(),
            dest.to_string(),
        ];
        argv.extend(option_args);
        argv
    }

    /// Runs the command and feeds every output line to the parser.
    ///
    /// A runner failure ends the drain but is returned alongside the parser
    /// rather than propagated, so finalization still runs over whatever
    /// output was collected. Spawn-time failures are returned the same way.
    async fn drain(
        &self,
        argv: &[String],
        mut parser: JobStatusParser,
    ) -> Result<(JobStatusParser, Option<TransferError>), TransferError> {
        let env = self.job_env()?;
        let mut failure = None;

        match exec::run(argv, &env) {
            Ok(mut lines) => loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        debug!("{line}");
                        parser.feed(&line);
                    }
                    Ok(None) => break,
                    Err(error) => {
                        warn!("transfer command failed: {error}");
                        failure = Some(error);
                        break;
                    }
                }
            },
            Err(error) => {
                warn!("transfer command could not start: {error}");
                failure = Some(error);
            }
        }

        Ok((parser, failure))
    }
}

/// Picks the best diagnostic for a runner failure.
///
/// When an endpoint carries a SAS token and that token has expired, the
/// expiry is reported as the root cause regardless of what the process
/// printed; otherwise the raw failure description is used. The destination
/// token takes precedence over the source token.
fn classify_failure(src: &Location, dest: &Location, error: &TransferError) -> String {
    let token = dest.sas_token().or_else(|| src.sas_token());
    if let Some(token) = token
        && sas::is_expired(token).unwrap_or(false)
    {
        return "SAS token is expired".to_string();
    }
    error.to_string()
}
