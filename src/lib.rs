//! Drive azcopy transfers and parse their job status output.
//!
//! This crate does not implement the transfer protocol itself; it builds
//! azcopy command lines from [`Location`] and option values, streams the
//! process's stdout through an incremental [`JobStatusParser`], and reduces
//! everything into a [`CopyJobInfo`] or [`SyncJobInfo`] record.

pub mod app;
pub mod cli;
pub mod client;
pub mod error;
pub mod exec;
pub mod job;
pub mod location;
pub mod options;
pub mod parse;
pub mod sas;

pub use client::AzClient;
pub use error::{SasTokenError, TransferError};
pub use job::{CopyJobInfo, SyncJobInfo};
pub use location::{LocalLocation, Location, LocationKind, RemoteSasLocation, Role};
pub use options::{CopyOptions, SyncOptions};
pub use parse::JobStatusParser;
