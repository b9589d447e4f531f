//! Transfer option flags, rendered to azcopy command-line arguments.
//!
//! Flag order is insignificant to azcopy but kept deterministic so that
//! built command lines are stable under test.

/// Options for a `cp` transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Descend into subdirectories when transferring.
    pub recursive: bool,

    /// Overwrite conflicting files and blobs at the destination.
    ///
    /// azcopy overwrites by default; when this is false an explicit
    /// `--overwrite false` is passed.
    pub overwrite_existing: bool,

    /// Save an MD5 hash of each file as the destination blob's
    /// Content-MD5 property (upload only).
    pub put_md5: bool,

    /// Paths to exclude from the transfer.
    pub exclude_path: Option<String>,
}

impl CopyOptions {
    /// Renders these options as command-line arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.recursive {
            args.push("--recursive".to_string());
        }

        if !self.overwrite_existing {
            args.push("--overwrite".to_string());
            args.push("false".to_string());
        }

        if self.put_md5 {
            args.push("--put-md5".to_string());
        }

        if let Some(exclude_path) = &self.exclude_path {
            args.push("--exclude-path".to_string());
            args.push(exclude_path.clone());
        }

        args
    }
}

/// Options for a `sync` transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Descend into subdirectories when transferring.
    pub recursive: bool,

    /// Save an MD5 hash of each file as the destination blob's
    /// Content-MD5 property (upload only).
    pub put_md5: bool,

    /// Delete destination files that no longer exist at the source.
    pub delete_destination: bool,

    /// Paths to exclude from the transfer.
    pub exclude_path: Option<String>,
}

impl SyncOptions {
    /// Renders these options as command-line arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.recursive {
            args.push("--recursive".to_string());
        }

        if self.put_md5 {
            args.push("--put-md5".to_string());
        }

        if self.delete_destination {
            args.push("--delete-destination".to_string());
            args.push("true".to_string());
        }

        if let Some(exclude_path) = &self.exclude_path {
            args.push("--exclude-path".to_string());
            args.push(exclude_path.clone());
        }

        args
    }
}
