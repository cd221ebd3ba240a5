//! API version gate.
//!
//! Every versioned endpoint compares the version token supplied in the
//! request path against the minimum version it supports. Requests below
//! the minimum (or with an unparseable token) are answered with 404 so
//! that unsupported versions are indistinguishable from missing routes.

use std::fmt;
use std::str::FromStr;

/// A parsed API version token, e.g. `"v1.0"`.
///
/// Versions order by `(major, minor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
}

/// The oldest version this API still serves.
pub const MIN_SUPPORTED: ApiVersion = ApiVersion { major: 1, minor: 0 };

impl ApiVersion {
    pub const V1_0: ApiVersion = ApiVersion { major: 1, minor: 0 };

    /// Version gate: does a request at this version reach an endpoint
    /// introduced at `min`? Pure, no side effects; the caller is
    /// responsible for rendering the failure as not-found.
    pub fn supports(&self, min: ApiVersion) -> bool {
        *self >= min
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid version token: {0}")]
pub struct VersionParseError(pub String);

impl FromStr for ApiVersion {
    type Err = VersionParseError;

    /// Accepts `v<major>.<minor>` (e.g. `v1.0`) and `v<major>` (e.g. `v2`,
    /// read as minor 0).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || VersionParseError(s.to_string());

        let rest = s.strip_prefix('v').ok_or_else(bad)?;
        let (major, minor) = match rest.split_once('.') {
            Some((maj, min)) => (maj, Some(min)),
            None => (rest, None),
        };

        let major: u16 = major.parse().map_err(|_| bad())?;
        let minor: u16 = match minor {
            Some(m) => m.parse().map_err(|_| bad())?,
            None => 0,
        };

        Ok(ApiVersion { major, minor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_major_minor() {
        let v: ApiVersion = "v1.0".parse().unwrap();
        assert_eq!(v, ApiVersion::V1_0);

        let v: ApiVersion = "v2.3".parse().unwrap();
        assert_eq!(v, ApiVersion { major: 2, minor: 3 });
    }

    #[test]
    fn parses_bare_major() {
        let v: ApiVersion = "v2".parse().unwrap();
        assert_eq!(v, ApiVersion { major: 2, minor: 0 });
    }

    #[test]
    fn rejects_garbage_tokens() {
        assert!("1.0".parse::<ApiVersion>().is_err());
        assert!("v".parse::<ApiVersion>().is_err());
        assert!("va.b".parse::<ApiVersion>().is_err());
        assert!("v1.0.0".parse::<ApiVersion>().is_err());
        assert!("".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn gate_passes_at_or_above_minimum() {
        assert!(ApiVersion::V1_0.supports(ApiVersion::V1_0));
        assert!(ApiVersion { major: 1, minor: 1 }.supports(ApiVersion::V1_0));
        assert!(ApiVersion { major: 2, minor: 0 }.supports(ApiVersion::V1_0));
    }

    #[test]
    fn gate_rejects_below_minimum() {
        assert!(!ApiVersion { major: 0, minor: 9 }.supports(ApiVersion::V1_0));
        assert!(!ApiVersion { major: 1, minor: 0 }.supports(ApiVersion { major: 1, minor: 1 }));
    }

    #[test]
    fn displays_as_token() {
        assert_eq!(ApiVersion::V1_0.to_string(), "v1.0");
    }
}
