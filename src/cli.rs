use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Transfer data between a local directory and Azure Blob Storage by
/// driving the azcopy binary.
#[derive(Clone, Debug, Parser)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub subcommand: CliCommand,
}

/// Subcommands of the CLI.
#[derive(Clone, Debug, Subcommand)]
pub enum CliCommand {
    /// Upload a local directory's contents to a blob container.
    Upload(TransferOptions),

    /// Download a blob container path into a local directory.
    Download(TransferOptions),
}

/// Global options that are always relevant.
#[derive(Clone, Debug, Args)]
#[command(next_help_heading = "Global")]
pub struct GlobalOptions {
    /// Enable more verbose output (repeatable up to 3 times).
    ///
    /// Output is emitted via stderr.
    #[arg(global = true, long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Options shared by the transfer subcommands.
#[derive(Clone, Debug, Args)]
#[command(next_help_heading = "Transfer")]
pub struct TransferOptions {
    /// The Azure storage account name.
    #[arg(long)]
    pub storage_account: String,

    /// The container to transfer data to or from.
    #[arg(long)]
    pub container: String,

    /// The blob path within the container.
    #[arg(long)]
    pub blob: String,

    /// SAS token with access to the container.
    ///
    /// The token must carry a session expiry (`se`) claim; expired tokens
    /// are rejected before azcopy is started.
    #[arg(long)]
    pub sas_token: String,

    /// The local directory to transfer data from or to.
    #[arg(long)]
    pub local_path: String,

    /// Paths to exclude from the transfer.
    #[arg(long)]
    pub exclude_path: Option<String>,

    /// The azcopy executable to invoke.
    ///
    /// Defaults to whatever `azcopy` resolves to on the PATH.
    #[arg(long, default_value = "azcopy")]
    pub exe: String,

    /// Directory for azcopy's job plan and log files.
    ///
    /// Created if it does not exist. When omitted, azcopy uses its own
    /// default locations.
    #[arg(long)]
    pub artefact_dir: Option<PathBuf>,
}
