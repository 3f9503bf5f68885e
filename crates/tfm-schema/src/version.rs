//! Four-part framework versions.
//!
//! Framework versions are not semantic versions: they always carry four
//! numeric parts (`major.minor.build.revision`) with unspecified parts
//! defaulting to zero, and folder names write them in a compact shorthand
//! (`net451` is version `4.5.1.0`).

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `major.minor.build.revision` version, ordered part by part.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct FrameworkVersion {
    /// Major part.
    pub major: u32,
    /// Minor part.
    pub minor: u32,
    /// Build part.
    pub build: u32,
    /// Revision part.
    pub revision: u32,
}

impl FrameworkVersion {
    /// The all-zero version used by unversioned frameworks such as `win` or `dnx`.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// The largest representable version, used as an open upper bound.
    pub const MAX: Self = Self::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX);

    /// Build a version from all four parts.
    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Build a `major.minor.0.0` version.
    pub const fn from_major_minor(major: u32, minor: u32) -> Self {
        Self::new(major, minor, 0, 0)
    }

    /// True when every part is zero.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// The four parts in order.
    pub fn parts(&self) -> [u32; 4] {
        [self.major, self.minor, self.build, self.revision]
    }

    fn from_parts(parts: &[u32]) -> Self {
        let part = |i: usize| parts.get(i).copied().unwrap_or(0);
        Self::new(part(0), part(1), part(2), part(3))
    }

    /// Parse the version portion of a folder name.
    ///
    /// Dotted input (`4.5.1`) is read as a regular 2-4 part version. Undotted
    /// input is read one digit per part from the first four digits, after
    /// padding a single digit with a trailing zero: `4` is `4.0`, `45` is
    /// `4.5`, `451` is `4.5.1` and `10` is `1.0`. Empty input is the empty
    /// version.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidVersion`] when the input is neither a
    /// valid dotted version nor a run of ASCII digits.
    pub fn parse_shorthand(s: &str) -> Result<Self, ParseError> {
        if s.is_empty() {
            return Ok(Self::EMPTY);
        }

        if s.contains('.') {
            return s.parse();
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidVersion(s.to_string()));
        }

        let mut digits: Vec<u32> = s
            .bytes()
            .take(4)
            .map(|b| u32::from(b - b'0'))
            .collect();

        if digits.len() == 1 {
            digits.push(0);
        }

        Ok(Self::from_parts(&digits))
    }

    /// Render the version in folder-name shorthand.
    ///
    /// Trailing zero parts are dropped down to `min_parts`. Parts are joined
    /// with dots when `dotted` is set or when any part needs more than one
    /// digit, otherwise they are concatenated. The empty version renders as
    /// an empty string.
    pub fn to_shorthand(&self, min_parts: usize, dotted: bool) -> String {
        if self.is_empty() {
            return String::new();
        }

        let parts = self.parts();
        let mut len = parts.len();
        while len > min_parts.max(1) && parts[len - 1] == 0 {
            len -= 1;
        }

        let kept = &parts[..len];
        let separator = if dotted || kept.iter().any(|p| *p > 9) {
            "."
        } else {
            ""
        };

        kept.iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl FromStr for FrameworkVersion {
    type Err = ParseError;

    /// Parse a dotted version with two to four parts (`4.5`, `10.0.15064.0`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidVersion(s.to_string());

        let pieces: Vec<&str> = s.trim().split('.').collect();
        if !(2..=4).contains(&pieces.len()) {
            return Err(invalid());
        }

        let mut parts = Vec::with_capacity(4);
        for piece in pieces {
            if piece.is_empty() || !piece.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            parts.push(piece.parse::<u32>().map_err(|_| invalid())?);
        }

        Ok(Self::from_parts(&parts))
    }
}

impl fmt::Display for FrameworkVersion {
    /// `major.minor`, followed by build and revision only when they are set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.build > 0 || self.revision > 0 {
            write!(f, ".{}", self.build)?;
        }
        if self.revision > 0 {
            write!(f, ".{}", self.revision)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorthand_forms_agree() {
        let expected = FrameworkVersion::from_major_minor(4, 5);
        assert_eq!(FrameworkVersion::parse_shorthand("45").unwrap(), expected);
        assert_eq!(FrameworkVersion::parse_shorthand("4.5").unwrap(), expected);
        assert_eq!(FrameworkVersion::parse_shorthand("450").unwrap(), expected);
        assert_eq!(FrameworkVersion::parse_shorthand("4.5.0").unwrap(), expected);
        assert_eq!(FrameworkVersion::parse_shorthand("4.5.0.0").unwrap(), expected);
    }

    #[test]
    fn test_shorthand_digit_rules() {
        assert_eq!(
            FrameworkVersion::parse_shorthand("4").unwrap(),
            FrameworkVersion::from_major_minor(4, 0)
        );
        assert_eq!(
            FrameworkVersion::parse_shorthand("10").unwrap(),
            FrameworkVersion::from_major_minor(1, 0)
        );
        assert_eq!(
            FrameworkVersion::parse_shorthand("451").unwrap(),
            FrameworkVersion::new(4, 5, 1, 0)
        );
        // only the first four digits are significant
        assert_eq!(
            FrameworkVersion::parse_shorthand("123456").unwrap(),
            FrameworkVersion::new(1, 2, 3, 4)
        );
        assert_eq!(
            FrameworkVersion::parse_shorthand("").unwrap(),
            FrameworkVersion::EMPTY
        );
    }

    #[test]
    fn test_invalid_versions() {
        assert!(FrameworkVersion::parse_shorthand("4a").is_err());
        assert!("1".parse::<FrameworkVersion>().is_err());
        assert!("1.2.3.4.5".parse::<FrameworkVersion>().is_err());
        assert!("1..2".parse::<FrameworkVersion>().is_err());
        assert!(".5".parse::<FrameworkVersion>().is_err());
        assert!("99999999999.0".parse::<FrameworkVersion>().is_err());
    }

    #[test]
    fn test_to_shorthand() {
        let v = FrameworkVersion::from_major_minor(4, 5);
        assert_eq!(v.to_shorthand(2, false), "45");
        assert_eq!(v.to_shorthand(2, true), "4.5");

        let win8 = FrameworkVersion::from_major_minor(8, 0);
        assert_eq!(win8.to_shorthand(1, false), "8");
        assert_eq!(win8.to_shorthand(2, false), "80");

        let uap = FrameworkVersion::new(10, 0, 15064, 0);
        assert_eq!(uap.to_shorthand(2, false), "10.0.15064");

        assert_eq!(FrameworkVersion::EMPTY.to_shorthand(2, false), "");
    }

    #[test]
    fn test_display_and_ordering() {
        assert_eq!(FrameworkVersion::from_major_minor(4, 0).to_string(), "4.0");
        assert_eq!(FrameworkVersion::new(4, 5, 1, 0).to_string(), "4.5.1");
        assert_eq!(FrameworkVersion::new(1, 0, 0, 7).to_string(), "1.0.0.7");

        assert!(FrameworkVersion::new(4, 5, 1, 0) > FrameworkVersion::from_major_minor(4, 5));
        assert!(FrameworkVersion::from_major_minor(10, 0) > FrameworkVersion::from_major_minor(9, 9));
    }
}
