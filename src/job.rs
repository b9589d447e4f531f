//! Job result records and summary-block field extraction.
//!
//! azcopy ends a job with a summary block of `<Label>: <integer>` lines.
//! Each record variant carries an explicit table mapping the exact label
//! text to the field it populates; extraction is best-effort and a label
//! that is absent or malformed silently leaves its field at 0.

use regex::Regex;

/// Result record for a `cp` job.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CopyJobInfo {
    /// Last progress percentage reported (azcopy may finish without ever
    /// reporting 100).
    pub percent_complete: f64,

    /// Best available failure diagnostic; empty means no error.
    pub error_message: String,

    /// The terminal status reported by azcopy, e.g. `Completed`.
    pub final_status: String,

    /// Number of File Transfers.
    pub file_transfers: u64,

    /// Number of Folder Property Transfers.
    pub folder_property_transfers: u64,

    /// Total Number of Transfers.
    pub total_transfers: u64,

    /// Number of Transfers Completed.
    pub transfers_completed: u64,

    /// Number of Transfers Failed.
    pub transfers_failed: u64,

    /// Number of Transfers Skipped.
    pub transfers_skipped: u64,

    /// TotalBytesTransferred.
    pub bytes_transferred: u64,

    /// True only once the terminal status indicates full success.
    pub completed: bool,
}

/// Result record for a `sync` job.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncJobInfo {
    /// Last progress percentage reported.
    pub percent_complete: f64,

    /// Best available failure diagnostic; empty means no error.
    pub error_message: String,

    /// The terminal status reported by azcopy, e.g. `Completed`.
    pub final_status: String,

    /// Files Scanned at Source.
    pub files_scanned_at_source: u64,

    /// Files Scanned at Destination.
    pub files_scanned_at_destination: u64,

    /// Number of Copy Transfers for Files.
    pub copy_transfers_for_files: u64,

    /// Number of Copy Transfers for Folder Properties.
    pub copy_transfers_for_folder_properties: u64,

    /// Total Number Of Copy Transfers.
    pub total_copy_transfers: u64,

    /// Number of Copy Transfers Completed.
    pub copy_transfers_completed: u64,

    /// Number of Copy Transfers Failed.
    pub copy_transfers_failed: u64,

    /// Number of Deletions at Destination.
    pub deletions_at_destination: u64,

    /// Total Number of Bytes Transferred.
    pub bytes_transferred: u64,

    /// Total Number of Bytes Enumerated.
    pub bytes_enumerated: u64,

    /// True only once the terminal status indicates full success.
    pub completed: bool,
}

/// Label-to-field table for copy summaries.
pub(crate) const COPY_FIELDS: &[(&str, fn(&mut CopyJobInfo, u64))] = &[
    ("Number of File Transfers", |job, value| {
        job.file_transfers = value;
    }),
    ("Number of Folder Property Transfers", |job, value| {
        job.folder_property_transfers = value;
    }),
    ("Total Number of Transfers", |job, value| {
        job.total_transfers = value;
    }),
    ("Number of Transfers Completed", |job, value| {
        job.transfers_completed = value;
    }),
    ("Number of Transfers Failed", |job, value| {
        job.transfers_failed = value;
    }),
    ("Number of Transfers Skipped", |job, value| {
        job.transfers_skipped = value;
    }),
    ("TotalBytesTransferred", |job, value| {
        job.bytes_transferred = value;
    }),
];

/// Label-to-field table for sync summaries.
pub(crate) const SYNC_FIELDS: &[(&str, fn(&mut SyncJobInfo, u64))] = &[
    ("Files Scanned at Source", |job, value| {
        job.files_scanned_at_source = value;
    }),
    ("Files Scanned at Destination", |job, value| {
        job.files_scanned_at_destination = value;
    }),
    ("Number of Copy Transfers for Files", |job, value| {
        job.copy_transfers_for_files = value;
    }),
    ("Number of Copy Transfers for Folder Properties", |job, value| {
        job.copy_transfers_for_folder_properties = value;
    }),
    ("Total Number Of Copy Transfers", |job, value| {
        job.total_copy_transfers = value;
    }),
    ("Number of Copy Transfers Completed", |job, value| {
        job.copy_transfers_completed = value;
    }),
    ("Number of Copy Transfers Failed", |job, value| {
        job.copy_transfers_failed = value;
    }),
    ("Number of Deletions at Destination", |job, value| {
        job.deletions_at_destination = value;
    }),
    ("Total Number of Bytes Transferred", |job, value| {
        job.bytes_transferred = value;
    }),
    ("Total Number of Bytes Enumerated", |job, value| {
        job.bytes_enumerated = value;
    }),
];

/// Looks up a labelled integer in a summary block.
///
/// Matches `<label>: <digits>` anchored at the start of a line, so a label
/// embedded inside a longer label cannot cross-match. Any failure (label
/// absent, number malformed, pattern build error) yields 0.
pub(crate) fn summary_value(label: &str, summary: &str) -> u64 {
    let pattern = format!(r"(?m)^\s*{}: (\d+)", regex::escape(label));
    let Ok(re) = Regex::new(&pattern) else {
        return 0;
    };
    re.captures(summary)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    const SUMMARY: &str = "\
Number of File Transfers: 12
Number of Folder Property Transfers: 3
Total Number of Transfers: 15
Number of Transfers Completed: 14
Number of Transfers Failed: 1
Number of Transfers Skipped: 0
TotalBytesTransferred: 104857600
";

    #[test_case("Number of File Transfers" => 12; "file transfers")]
    #[test_case("Total Number of Transfers" => 15; "total transfers")]
    #[test_case("Number of Transfers Failed" => 1; "failed transfers")]
    #[test_case("TotalBytesTransferred" => 104_857_600; "bytes transferred")]
    #[test_case("Elapsed Time Minutes" => 0; "absent label defaults to zero")]
    fn copy_summary_lookup(label: &str) -> u64 {
        summary_value(label, SUMMARY)
    }

    #[test]
    fn label_embedded_in_longer_label_does_not_cross_match() {
        let summary = "Total Number of Transfers: 15\nNumber of Transfers: 7\n";
        assert_eq!(summary_value("Number of Transfers", summary), 7);
        assert_eq!(summary_value("Total Number of Transfers", summary), 15);
    }

    #[test]
    fn malformed_number_defaults_to_zero() {
        let summary = "Number of Transfers Failed: many\n";
        assert_eq!(summary_value("Number of Transfers Failed", summary), 0);
    }

    #[test]
    fn indented_label_still_matches() {
        let summary = "   Number of Transfers Completed: 9\n";
        assert_eq!(summary_value("Number of Transfers Completed", summary), 9);
    }

    #[test]
    fn copy_table_populates_every_counter() {
        let mut job = CopyJobInfo::default();
        for (label, assign) in COPY_FIELDS {
            assign(&mut job, summary_value(label, SUMMARY));
        }
        assert_eq!(job.file_transfers, 12);
        assert_eq!(job.folder_property_transfers, 3);
        assert_eq!(job.total_transfers, 15);
        assert_eq!(job.transfers_completed, 14);
        assert_eq!(job.transfers_failed, 1);
        assert_eq!(job.transfers_skipped, 0);
        assert_eq!(job.bytes_transferred, 104_857_600);
    }
}
