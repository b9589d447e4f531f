use std::io::stderr;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use crate::{
    cli::{Cli, CliCommand, TransferOptions},
    client::AzClient,
    job::CopyJobInfo,
    location::{LocalLocation, Location, RemoteSasLocation, Role},
    options::CopyOptions,
};

pub async fn run() -> anyhow::Result<()> {
    // Parse CLI options
    let options = Cli::parse();
    init_tracing(&options);

    // Run command
    let job = match options.subcommand {
        CliCommand::Upload(command) => upload(command).await?,
        CliCommand::Download(command) => download(command).await?,
    };

    println!("Final Job Status = {}", job.final_status);
    Ok(())
}

/// Copies the local directory's contents into the blob path.
async fn upload(options: TransferOptions) -> anyhow::Result<CopyJobInfo> {
    let src: Location = LocalLocation::new(&options.local_path, Role::Source)
        .with_wildcard()
        .into();
    let dest: Location = RemoteSasLocation::new(
        &options.storage_account,
        &options.container,
        &options.blob,
        &options.sas_token,
        Role::Destination,
    )?
    .into();

    let job = client(&options)
        .copy(&src, &dest, &copy_options(&options))
        .await?;
    Ok(job)
}

/// Copies the blob path's contents into the local directory.
async fn download(options: TransferOptions) -> anyhow::Result<CopyJobInfo> {
    let src: Location = RemoteSasLocation::new(
        &options.storage_account,
        &options.container,
        &options.blob,
        &options.sas_token,
        Role::Source,
    )?
    .with_wildcard()
    .into();
    let dest: Location = LocalLocation::new(&options.local_path, Role::Destination).into();

    let job = client(&options)
        .copy(&src, &dest, &copy_options(&options))
        .await?;
    Ok(job)
}

fn client(options: &TransferOptions) -> AzClient {
    let client = AzClient::new(&options.exe);
    match &options.artefact_dir {
        Some(dir) => client.with_artefact_dir(dir),
        None => client,
    }
}

fn copy_options(options: &TransferOptions) -> CopyOptions {
    CopyOptions {
        recursive: true,
        overwrite_existing: false,
        put_md5: false,
        exclude_path: options.exclude_path.clone(),
    }
}

/// Setup the tracing subscriber based on the provided CLI options.
fn init_tracing(options: &Cli) {
    let filter = match options.global.verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3.. => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .compact()
        .with_max_level(filter)
        .with_writer(stderr)
        .init();
}
