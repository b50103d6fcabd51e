//! OSGi version parsing, comparison, and range matching.
//!
//! OSGi versions have the shape `major[.minor[.micro[.qualifier]]]`:
//! - Missing numeric segments default to `0`
//! - Numeric segments compare as numbers
//! - The qualifier compares as a plain string, and an empty qualifier sorts first

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Malformed version or version range text.
#[derive(Debug, Clone, Error, Diagnostic, PartialEq, Eq)]
pub enum VersionError {
    #[error("invalid version '{input}': {reason}")]
    #[diagnostic(help("Versions look like `1`, `1.2`, `1.2.3` or `1.2.3.qualifier`"))]
    InvalidVersion { input: String, reason: String },

    #[error("invalid version range '{input}': {reason}")]
    #[diagnostic(help("Ranges look like `1.0` (at least), `[1.0,2.0)` or `[1.5]`"))]
    InvalidRange { input: String, reason: String },
}

/// A parsed OSGi version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub micro: u64,
    pub qualifier: String,
}

impl Version {
    /// `0.0.0`, the lowest possible version.
    pub const fn zero() -> Self {
        Self {
            major: 0,
            minor: 0,
            micro: 0,
            qualifier: String::new(),
        }
    }

    pub fn new(major: u64, minor: u64, micro: u64) -> Self {
        Self {
            major,
            minor,
            micro,
            qualifier: String::new(),
        }
    }

    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let s = version.trim();
        if s.is_empty() {
            return Ok(Self::zero());
        }

        let invalid = |reason: &str| VersionError::InvalidVersion {
            input: version.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = s.splitn(4, '.');
        let mut numbers = [0u64; 3];
        for (i, slot) in numbers.iter_mut().enumerate() {
            match parts.next() {
                Some(token) => {
                    *slot = token
                        .parse::<u64>()
                        .map_err(|_| invalid(&format!("segment {} is not a number", i + 1)))?;
                }
                None => break,
            }
        }

        let qualifier = parts.next().unwrap_or_default();
        if !qualifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid("qualifier may only contain [A-Za-z0-9_-]"));
        }

        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            micro: numbers[2],
            qualifier: qualifier.to_string(),
        })
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if !self.qualifier.is_empty() {
            write!(f, ".{}", self.qualifier)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.to_string()
    }
}

/// An OSGi version range expression.
///
/// Supports: `1.0` (at least 1.0), `[1.0,2.0)`, `(1.0,2.0]`, `[1.5]` (exact),
/// and the empty string or `*` for any version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionRange {
    pub lower: Bound,
    pub upper: Option<Bound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub version: Version,
    pub inclusive: bool,
}

impl VersionRange {
    /// The range matching every version, `[0.0.0,∞)`.
    pub fn any() -> Self {
        Self::at_least(Version::zero())
    }

    pub fn at_least(version: Version) -> Self {
        Self {
            lower: Bound {
                version,
                inclusive: true,
            },
            upper: None,
        }
    }

    pub fn exactly(version: Version) -> Self {
        Self {
            lower: Bound {
                version: version.clone(),
                inclusive: true,
            },
            upper: Some(Bound {
                version,
                inclusive: true,
            }),
        }
    }

    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let s = text.trim();
        if s.is_empty() || s == "*" {
            return Ok(Self::any());
        }

        let invalid = |reason: &str| VersionError::InvalidRange {
            input: text.to_string(),
            reason: reason.to_string(),
        };

        if !s.starts_with('[') && !s.starts_with('(') {
            return Ok(Self::at_least(Version::parse(s)?));
        }

        let open_inclusive = s.starts_with('[');
        let close_inclusive = if s.ends_with(']') {
            true
        } else if s.ends_with(')') {
            false
        } else {
            return Err(invalid("missing closing ']' or ')'"));
        };
        let inner = &s[1..s.len() - 1];

        match inner.split_once(',') {
            Some((lower, upper)) => {
                let lower = Version::parse(lower)?;
                let upper = upper.trim();
                let upper = if upper.is_empty() {
                    None
                } else {
                    Some(Bound {
                        version: Version::parse(upper)?,
                        inclusive: close_inclusive,
                    })
                };
                if let Some(ref up) = upper {
                    if up.version < lower {
                        return Err(invalid("upper bound is below lower bound"));
                    }
                }
                Ok(Self {
                    lower: Bound {
                        version: lower,
                        inclusive: open_inclusive,
                    },
                    upper,
                })
            }
            None => {
                if !open_inclusive || !close_inclusive {
                    return Err(invalid("an exact version must use '[v]'"));
                }
                Ok(Self::exactly(Version::parse(inner)?))
            }
        }
    }

    /// Check if a version satisfies this range.
    pub fn contains(&self, version: &Version) -> bool {
        let cmp = version.cmp(&self.lower.version);
        if self.lower.inclusive {
            if cmp == Ordering::Less {
                return false;
            }
        } else if cmp != Ordering::Greater {
            return false;
        }
        if let Some(ref upper) = self.upper {
            let cmp = version.cmp(&upper.version);
            if upper.inclusive {
                if cmp == Ordering::Greater {
                    return false;
                }
            } else if cmp != Ordering::Less {
                return false;
            }
        }
        true
    }

    pub fn is_any(&self) -> bool {
        self.upper.is_none() && self.lower.inclusive && self.lower.version == Version::zero()
    }
}

impl Default for VersionRange {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.upper {
            None if self.lower.inclusive => write!(f, "{}", self.lower.version),
            None => write!(f, "({},)", self.lower.version),
            Some(upper) if upper.version == self.lower.version && upper.inclusive => {
                write!(f, "[{}]", upper.version)
            }
            Some(upper) => write!(
                f,
                "{}{},{}{}",
                if self.lower.inclusive { '[' } else { '(' },
                self.lower.version,
                upper.version,
                if upper.inclusive { ']' } else { ')' },
            ),
        }
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionRange {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionRange> for String {
    fn from(value: VersionRange) -> Self {
        value.to_string()
    }
}
