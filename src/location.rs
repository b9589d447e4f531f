//! Transfer endpoints: local filesystem paths and SAS-authenticated
//! remote container paths, each rendering to a single azcopy argument.

use std::fmt::{self, Display};
use std::path::Path;

use crate::error::TransferError;
use crate::sas;

/// The role an endpoint plays in a transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Data is read from this endpoint.
    Source,

    /// Data is written to this endpoint.
    Destination,
}

/// The kind of an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationKind {
    /// A local filesystem path.
    Local,

    /// A remote blob container path.
    Remote,
}

/// A local filesystem endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalLocation {
    /// Filesystem path, absolute or relative.
    pub path: String,

    /// Append a wildcard so the directory's contents are transferred
    /// without the containing directory itself.
    pub use_wildcard: bool,

    /// This endpoint's role in the transfer.
    pub role: Role,
}

impl LocalLocation {
    /// Creates a local endpoint without a wildcard.
    #[must_use]
    pub fn new(path: impl Into<String>, role: Role) -> Self {
        Self {
            path: path.into(),
            use_wildcard: false,
            role,
        }
    }

    /// Requests a wildcard suffix when this endpoint is a source.
    #[must_use]
    pub fn with_wildcard(mut self) -> Self {
        self.use_wildcard = true;
        self
    }
}

impl Display for LocalLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;

        // Wildcards only make sense when reading from the endpoint.
        if self.role == Role::Source && self.use_wildcard {
            if !self.path.ends_with('/') {
                f.write_str("/")?;
            }
            f.write_str("*")?;
        }

        Ok(())
    }
}

/// A remote container endpoint authenticated with a SAS token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteSasLocation {
    /// Storage account name.
    pub storage_account: String,

    /// Container within the storage account.
    pub container: String,

    /// Blob path within the container.
    pub path: String,

    /// Opaque SAS token (query-string form, without a leading `?`).
    pub sas_token: String,

    /// Append a wildcard so the directory's contents are transferred
    /// without the containing directory itself.
    pub use_wildcard: bool,

    /// This endpoint's role in the transfer.
    pub role: Role,
}

impl RemoteSasLocation {
    /// Creates a remote endpoint, eagerly validating the SAS token.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::ExpiredCredential`] when the token carries a
    /// session expiry in the past, and propagates [`SasTokenError`] when the
    /// expiry claim is missing or malformed. Empty tokens are not validated.
    ///
    /// [`SasTokenError`]: crate::error::SasTokenError
    pub fn new(
        storage_account: impl Into<String>,
        container: impl Into<String>,
        path: impl Into<String>,
        sas_token: impl Into<String>,
        role: Role,
    ) -> Result<Self, TransferError> {
        let sas_token = sas_token.into();
        if !sas_token.is_empty() && sas::is_expired(&sas_token)? {
            return Err(TransferError::ExpiredCredential);
        }

        Ok(Self {
            storage_account: storage_account.into(),
            container: container.into(),
            path: path.into(),
            sas_token,
            use_wildcard: false,
            role,
        })
    }

    /// Requests a wildcard suffix when this endpoint is a source.
    #[must_use]
    pub fn with_wildcard(mut self) -> Self {
        self.use_wildcard = true;
        self
    }

    /// The container URI this endpoint points into.
    #[must_use]
    pub fn resource_uri(&self) -> String {
        format!(
            "https://{}.blob.core.windows.net/{}/",
            self.storage_account, self.container
        )
    }
}

impl Display for RemoteSasLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wildcard = if self.role == Role::Source && self.use_wildcard {
            "*"
        } else {
            ""
        };
        write!(
            f,
            "{}{}{wildcard}?{}",
            self.resource_uri(),
            self.path,
            self.sas_token
        )
    }
}

/// Either endpoint kind, as accepted by the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// A local filesystem endpoint.
    Local(LocalLocation),

    /// A remote container endpoint.
    Remote(RemoteSasLocation),
}

impl Location {
    /// The kind of this endpoint.
    #[must_use]
    pub fn kind(&self) -> LocationKind {
        match self {
            Self::Local(_) => LocationKind::Local,
            Self::Remote(_) => LocationKind::Remote,
        }
    }

    /// The SAS token, when this endpoint is remote and carries one.
    #[must_use]
    pub fn sas_token(&self) -> Option<&str> {
        match self {
            Self::Remote(remote) if !remote.sas_token.is_empty() => Some(&remote.sas_token),
            _ => None,
        }
    }

    /// The filesystem path, when this endpoint is local.
    #[must_use]
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Self::Local(local) => Some(Path::new(&local.path)),
            Self::Remote(_) => None,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(local) => local.fmt(f),
            Self::Remote(remote) => remote.fmt(f),
        }
    }
}

impl From<LocalLocation> for Location {
    fn from(local: LocalLocation) -> Self {
        Self::Local(local)
    }
}

impl From<RemoteSasLocation> for Location {
    fn from(remote: RemoteSasLocation) -> Self {
        Self::Remote(remote)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::error::SasTokenError;

    #[test_case("/data", true, Role::Source => "/data/*"; "wildcard source without trailing slash")]
    #[test_case("/data/", true, Role::Source => "/data/*"; "wildcard source with trailing slash")]
    #[test_case("/data", false, Role::Source => "/data"; "source without wildcard")]
    #[test_case("/data", true, Role::Destination => "/data"; "wildcard ignored for destination")]
    #[test_case("relative/dir/", true, Role::Source => "relative/dir/*"; "relative path")]
    fn local_rendering(path: &str, use_wildcard: bool, role: Role) -> String {
        let mut location = LocalLocation::new(path, role);
        location.use_wildcard = use_wildcard;
        location.to_string()
    }

    fn remote(path: &str, role: Role) -> RemoteSasLocation {
        RemoteSasLocation::new("acct", "store", path, "se=2999-01-01T00:00:00Z", role).unwrap()
    }

    #[test]
    fn remote_rendering_destination() {
        assert_eq!(
            remote("backup/", Role::Destination).to_string(),
            "https://acct.blob.core.windows.net/store/backup/?se=2999-01-01T00:00:00Z"
        );
    }

    #[test]
    fn remote_rendering_wildcard_source() {
        assert_eq!(
            remote("backup/", Role::Source).with_wildcard().to_string(),
            "https://acct.blob.core.windows.net/store/backup/*?se=2999-01-01T00:00:00Z"
        );
    }

    #[test]
    fn remote_wildcard_ignored_for_destination() {
        assert_eq!(
            remote("backup/", Role::Destination)
                .with_wildcard()
                .to_string(),
            "https://acct.blob.core.windows.net/store/backup/?se=2999-01-01T00:00:00Z"
        );
    }

    #[test]
    fn expired_token_rejected_at_construction() {
        let result = RemoteSasLocation::new(
            "acct",
            "store",
            "backup/",
            "se=2001-01-01T00:00:00Z",
            Role::Destination,
        );
        assert!(matches!(result, Err(TransferError::ExpiredCredential)));
    }

    #[test]
    fn token_without_expiry_rejected_at_construction() {
        let result =
            RemoteSasLocation::new("acct", "store", "backup/", "sp=r&sig=x", Role::Destination);
        assert!(matches!(
            result,
            Err(TransferError::SasToken(SasTokenError::MissingExpiryClaim))
        ));
    }

    #[test]
    fn empty_token_skips_validation() {
        let location = RemoteSasLocation::new("acct", "store", "backup/", "", Role::Destination);
        assert!(location.is_ok());
    }

    #[test]
    fn location_accessors() {
        let local: Location = LocalLocation::new("/data", Role::Source).into();
        let remote: Location = remote("backup/", Role::Destination).into();

        assert_eq!(local.kind(), LocationKind::Local);
        assert_eq!(remote.kind(), LocationKind::Remote);
        assert_eq!(local.sas_token(), None);
        assert_eq!(remote.sas_token(), Some("se=2999-01-01T00:00:00Z"));
        assert_eq!(local.local_path(), Some(Path::new("/data")));
        assert_eq!(remote.local_path(), None);
    }
}
