//! Version tokens and half-open range specifiers.
//!
//! A range is written `LOWER <= v < UPPER` with both bounds exact versions,
//! denoting the half-open interval `[LOWER, UPPER)`. Anything else is not a
//! range; a bare exact version used as a git-dependency ref is an exact pin.

use std::fmt;

use semver::Version;

/// Parse an exact version token, tolerating the leading `v` git tags
/// commonly carry (`v1.2.0` parses as `1.2.0`).
pub fn parse_version(token: &str) -> Option<Version> {
    let token = token.trim();
    let token = token.strip_prefix('v').unwrap_or(token);
    Version::parse(token).ok()
}

/// A half-open version interval `[lower, upper)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    pub lower: Version,
    pub upper: Version,
}

impl VersionRange {
    /// Parse a `LOWER <= v < UPPER` range specifier.
    ///
    /// Returns `None` for anything that is not exactly one such expression
    /// with two valid version bounds.
    pub fn parse(spec: &str) -> Option<Self> {
        let (lower, upper) = spec.split_once("<= v <")?;
        if upper.contains("<= v <") {
            return None;
        }
        let lower = parse_version(lower)?;
        let upper = parse_version(upper)?;
        Some(Self { lower, upper })
    }

    /// Check if a version satisfies this range.
    pub fn contains(&self, version: &Version) -> bool {
        *version >= self.lower && *version < self.upper
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <= v < {}", self.lower, self.upper)
    }
}
