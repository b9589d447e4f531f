//! SAS token expiry checks.
//!
//! A SAS token is an opaque query string; the `se` parameter carries the
//! session expiry as a `YYYY-MM-DDTHH:MM:SSZ` UTC timestamp.

use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};
use url::form_urlencoded;

use crate::error::SasTokenError;

/// Query parameter holding the session expiry claim.
const EXPIRY_PARAM: &str = "se";

/// Fixed timestamp format used by the expiry claim.
const EXPIRY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// Extracts the session expiry instant from a SAS token.
///
/// The token may carry a leading `?`.
///
/// # Errors
///
/// Returns [`SasTokenError::MissingExpiryClaim`] when the token has no `se`
/// parameter, and [`SasTokenError::MalformedTimestamp`] when its value does
/// not parse as the fixed format.
pub fn expires_at(token: &str) -> Result<OffsetDateTime, SasTokenError> {
    let token = token.strip_prefix('?').unwrap_or(token);
    let expiry = form_urlencoded::parse(token.as_bytes())
        .find(|(key, _)| key == EXPIRY_PARAM)
        .map(|(_, value)| value.into_owned())
        .ok_or(SasTokenError::MissingExpiryClaim)?;

    PrimitiveDateTime::parse(&expiry, EXPIRY_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| SasTokenError::MalformedTimestamp(expiry))
}

/// Checks whether a SAS token's session expiry has passed.
///
/// # Errors
///
/// See [`expires_at`].
pub fn is_expired(token: &str) -> Result<bool, SasTokenError> {
    is_expired_at(token, OffsetDateTime::now_utc())
}

/// Checks whether a SAS token's session expiry is strictly before `now`.
///
/// Pure function of (token, now); [`is_expired`] supplies the current time.
///
/// # Errors
///
/// See [`expires_at`].
pub fn is_expired_at(token: &str, now: OffsetDateTime) -> Result<bool, SasTokenError> {
    Ok(expires_at(token)? < now)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use time::macros::datetime;

    use super::*;

    const NOW: OffsetDateTime = datetime!(2024-06-15 12:00:00 UTC);

    #[test_case(""; "empty token")]
    #[test_case("sp=r&sig=abc"; "no expiry parameter")]
    #[test_case("?sp=r&sig=abc"; "no expiry parameter with question mark")]
    #[test_case("session=2024-06-15T12:00:00Z"; "wrong parameter name")]
    fn missing_expiry_claim(token: &str) {
        assert_eq!(expires_at(token), Err(SasTokenError::MissingExpiryClaim));
    }

    #[test_case("se=not-a-date"; "not a date")]
    #[test_case("se=2024-06-15"; "date only")]
    #[test_case("se=2024-06-15T12:00:00"; "missing zone suffix")]
    #[test_case("se=15-06-2024T12:00:00Z"; "wrong field order")]
    fn malformed_timestamp(token: &str) {
        assert!(matches!(
            expires_at(token),
            Err(SasTokenError::MalformedTimestamp(_))
        ));
    }

    #[test_case("se=2024-06-15T11:59:59Z" => true; "one second past expiry")]
    #[test_case("se=2024-06-15T12:00:00Z" => false; "exactly at expiry")]
    #[test_case("se=2024-06-15T12:00:01Z" => false; "one second before expiry")]
    #[test_case("?se=2024-06-14T00:00:00Z" => true; "expired with question mark")]
    #[test_case("sp=r&se=2025-01-01T00:00:00Z&sig=abc" => false; "valid among other parameters")]
    fn expiry_boundary(token: &str) -> bool {
        is_expired_at(token, NOW).unwrap()
    }

    #[test]
    fn parses_expiry_instant() {
        let expiry = expires_at("se=2024-06-15T12:00:00Z").unwrap();
        assert_eq!(expiry, NOW);
    }

    #[test]
    fn url_encoded_expiry_value() {
        // Colons are often percent-encoded inside real tokens.
        let expiry = expires_at("se=2024-06-15T12%3A00%3A00Z").unwrap();
        assert_eq!(expiry, NOW);
    }
}
