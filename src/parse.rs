//! Incremental parser for azcopy's streamed stdout.
//!
//! The parser is a two-state machine: it starts out scanning for progress
//! and status markers, and switches to summary accumulation once the
//! `Job <id> summary` header appears. Feeding it the same line sequence
//! always produces the same record.

use std::sync::LazyLock;

use regex::Regex;

use crate::job::{COPY_FIELDS, CopyJobInfo, SYNC_FIELDS, SyncJobInfo, summary_value};

/// Leading progress pattern, e.g. `45.0 %, 2 Done, ...`.
static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+) %,").expect("percent pattern is valid"));

/// Marker for authentication failures reported mid-stream.
const AUTH_FAILED_MARKER: &str = "AuthenticationFailed";

/// Marker for the terminal status line.
const FINAL_STATUS_MARKER: &str = "Final Job Status:";

/// Which job variant's summary is being collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Variant {
    Copy,
    Sync,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Watching for progress, status markers, and the summary header.
    Scanning,

    /// The summary header has been seen; lines accumulate in the buffer.
    InSummary,
}

/// Incremental extractor of job status from azcopy output lines.
#[derive(Clone, Debug)]
pub struct JobStatusParser {
    variant: Variant,
    state: State,
    percent_complete: f64,
    error_message: String,
    final_status: String,
    summary: String,
}

impl JobStatusParser {
    /// Creates a parser for `cp` job output.
    #[must_use]
    pub fn copy() -> Self {
        Self::new(Variant::Copy)
    }

    /// Creates a parser for `sync` job output.
    #[must_use]
    pub fn sync() -> Self {
        Self::new(Variant::Sync)
    }

    fn new(variant: Variant) -> Self {
        Self {
            variant,
            state: State::Scanning,
            percent_complete: 0.0,
            error_message: String::new(),
            final_status: String::new(),
            summary: String::new(),
        }
    }

    /// Consumes one line of output, updating the running state.
    ///
    /// A single line may trigger several updates; the checks below run in
    /// a fixed order. Note that summary accumulation is checked before the
    /// summary header, so the header line itself never enters the buffer.
    pub fn feed(&mut self, line: &str) {
        // Progress lines lead with `<float> %,`; the last one seen wins.
        if line.contains('%')
            && let Some(captures) = PERCENT_RE.captures(line)
            && let Ok(percent) = captures[1].parse()
        {
            self.percent_complete = percent;
        }

        if self.state == State::InSummary {
            match self.variant {
                Variant::Copy => self.summary.push_str(line),
                // The sync summary decorates some labels with parentheses;
                // strip them so labels match their canonical text.
                Variant::Sync => self
                    .summary
                    .extend(line.chars().filter(|c| !matches!(c, '(' | ')'))),
            }
            self.summary.push('\n');
        }

        // The summary block is announced by a `Job <id> summary` header.
        let lowered = line.trim().to_lowercase();
        if lowered.starts_with("job") && lowered.contains("summary") {
            self.state = State::InSummary;
        }

        if line.contains(AUTH_FAILED_MARKER) {
            self.error_message = line.to_string();
        }

        if line.contains(FINAL_STATUS_MARKER)
            && let Some(status) = line.rsplit(':').next()
        {
            self.final_status = status.trim().to_string();
        }
    }

    /// Finalizes into a copy job record, extracting the summary counters.
    ///
    /// `completed` is left false; the orchestrator applies the terminal
    /// status rule.
    #[must_use]
    pub fn finish_copy(self) -> CopyJobInfo {
        let mut job = CopyJobInfo {
            percent_complete: self.percent_complete,
            error_message: self.error_message,
            final_status: self.final_status,
            ..CopyJobInfo::default()
        };
        for (label, assign) in COPY_FIELDS {
            assign(&mut job, summary_value(label, &self.summary));
        }
        job
    }

    /// Finalizes into a sync job record, extracting the summary counters.
    ///
    /// `completed` is left false; the orchestrator applies the terminal
    /// status rule.
    #[must_use]
    pub fn finish_sync(self) -> SyncJobInfo {
        let mut job = SyncJobInfo {
            percent_complete: self.percent_complete,
            error_message: self.error_message,
            final_status: self.final_status,
            ..SyncJobInfo::default()
        };
        for (label, assign) in SYNC_FIELDS {
            assign(&mut job, summary_value(label, &self.summary));
        }
        job
    }
}
