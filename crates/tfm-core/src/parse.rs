//! Token parsing.
//!
//! Two grammars are accepted. Folder names (`net45`, `sl3-wp`,
//! `portable-net45+win8`) are the compact form used in package layouts.
//! Long names (`.NETFramework,Version=v4.5,Profile=Client`) are the form
//! project files use; any token containing a comma is read as a long name.

use crate::framework::{FrameworkIdentity, PortableProfile};
use crate::provider::FrameworkNameProvider;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::str::FromStr;
use tfm_schema::identifier::{ids, special};
use tfm_schema::{FrameworkName, FrameworkVersion, ParseError};

/// Bare version numbers that older packages used as `net` folder names.
const DEPRECATED_NET_VERSIONS: &[(&str, u32, u32)] = &[
    ("45", 4, 5),
    ("4.5", 4, 5),
    ("40", 4, 0),
    ("4.0", 4, 0),
    ("4", 4, 0),
    ("35", 3, 5),
    ("3.5", 3, 5),
    ("20", 2, 0),
    ("2", 2, 0),
    ("2.0", 2, 0),
];

/// A folder name split into its three lexical parts.
#[derive(Debug, PartialEq, Eq)]
struct RawFolderName<'a> {
    identifier: &'a str,
    version: &'a str,
    profile: &'a str,
}

impl<'a> RawFolderName<'a> {
    /// `identifier` is letters and dots, `version` digits and dots, and the
    /// optional `-profile` suffix letters, digits, dots, `+` and `-`.
    fn scan(token: &'a str) -> Option<Self> {
        let id_end = token
            .bytes()
            .position(|b| !(b.is_ascii_alphabetic() || b == b'.'))
            .unwrap_or(token.len());
        if id_end == 0 {
            return None;
        }

        let rest = &token[id_end..];
        let version_end = rest
            .bytes()
            .position(|b| !(b.is_ascii_digit() || b == b'.'))
            .unwrap_or(rest.len());
        let version = &rest[..version_end];
        let rest = &rest[version_end..];

        let profile = if rest.is_empty() {
            ""
        } else {
            let profile = rest.strip_prefix('-')?;
            let valid = !profile.is_empty()
                && profile
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'+' | b'-'));
            if !valid {
                return None;
            }
            profile
        };

        Some(Self {
            identifier: &token[..id_end],
            version,
            profile,
        })
    }
}

fn special_framework(token: &str) -> Option<FrameworkIdentity> {
    if token.eq_ignore_ascii_case(special::ANY) {
        Some(FrameworkIdentity::any())
    } else if token.eq_ignore_ascii_case(special::AGNOSTIC) {
        Some(FrameworkIdentity::agnostic())
    } else if token.eq_ignore_ascii_case(special::UNSUPPORTED) {
        Some(FrameworkIdentity::unsupported())
    } else {
        None
    }
}

fn deprecated_framework(token: &str) -> Option<FrameworkIdentity> {
    DEPRECATED_NET_VERSIONS
        .iter()
        .find(|(name, _, _)| *name == token)
        .map(|(_, major, minor)| {
            FrameworkIdentity::new(ids::NET, FrameworkVersion::from_major_minor(*major, *minor))
        })
}

/// `Profile7` style references into the portable profile table.
fn profile_number(profile: &str) -> Option<Result<u32, ParseError>> {
    let prefix = profile.get(..7)?;
    if !prefix.eq_ignore_ascii_case("profile") {
        return None;
    }
    let digits = &profile[7..];
    Some(
        digits
            .parse::<u32>()
            .map_err(|_| ParseError::UnknownPortableProfile(profile.to_string())),
    )
}

/// `Version=` values: a leading `v` is optional and a lone major gets `.0`.
fn parse_long_version(value: &str) -> Result<FrameworkVersion, ParseError> {
    let trimmed = value.trim();
    let trimmed = trimmed
        .strip_prefix(['v', 'V'])
        .unwrap_or(trimmed);
    if trimmed.contains('.') {
        trimmed.parse()
    } else {
        format!("{trimmed}.0")
            .parse()
            .map_err(|_| ParseError::InvalidVersion(value.to_string()))
    }
}

impl FrameworkNameProvider {
    /// Parse a folder name or long name.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the token is empty or malformed. An
    /// unknown identifier in an otherwise well-formed folder name is not an
    /// error; it parses as `Unsupported`.
    pub fn parse(&self, token: &str) -> Result<FrameworkIdentity, ParseError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ParseError::Empty);
        }

        if token.contains(',') {
            self.parse_full_name(token)
        } else {
            self.parse_folder_name(token)
        }
    }

    /// Parse a folder name such as `net40-client` or `portable-net45+win8`.
    ///
    /// # Errors
    ///
    /// See [`FrameworkNameProvider::parse`].
    pub fn parse_folder_name(&self, token: &str) -> Result<FrameworkIdentity, ParseError> {
        let decoded: Cow<'_, str> = if token.contains('%') {
            percent_decode_str(token)
                .decode_utf8()
                .map_err(|_| ParseError::InvalidEscape(token.to_string()))?
        } else {
            Cow::Borrowed(token)
        };
        let token = decoded.trim();
        if token.is_empty() {
            return Err(ParseError::Empty);
        }

        if let Some(framework) = special_framework(token) {
            return Ok(framework);
        }

        let Some(raw) = RawFolderName::scan(token) else {
            return deprecated_framework(token)
                .ok_or_else(|| ParseError::InvalidToken(token.to_string()));
        };

        let Some(name) = self.identifier(raw.identifier) else {
            tracing::debug!(token, identifier = raw.identifier, "Unknown framework identifier");
            return Ok(FrameworkIdentity::unsupported());
        };

        let version = if raw.version.is_empty() {
            self.bare_version(&name).unwrap_or(FrameworkVersion::EMPTY)
        } else {
            FrameworkVersion::parse_shorthand(raw.version)?
        };

        if name.is(ids::PORTABLE) {
            let profile = self.parse_portable_profile(raw.profile, token)?;
            return Ok(FrameworkIdentity::portable(version, profile));
        }

        let profile = self.profile(&name, raw.profile).unwrap_or(raw.profile);
        Ok(FrameworkIdentity::with_profile(name, version, profile))
    }

    /// Parse a long name such as `.NETFramework,Version=v4.5,Profile=Client`.
    ///
    /// Unknown identifiers are kept as written. Unrecognised `Key=Value`
    /// components are ignored.
    ///
    /// # Errors
    ///
    /// See [`FrameworkNameProvider::parse`].
    pub fn parse_full_name(&self, token: &str) -> Result<FrameworkIdentity, ParseError> {
        let parts: Vec<&str> = token
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let Some(first) = parts.first().copied() else {
            return Err(ParseError::Empty);
        };

        if let Some(framework) = special_framework(first) {
            return Ok(framework);
        }

        let valid_identifier = !first.starts_with(|c: char| c.is_ascii_digit())
            && first
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_'));
        if !valid_identifier {
            return Err(ParseError::InvalidToken(token.to_string()));
        }

        let name = self
            .identifier(first)
            .unwrap_or_else(|| FrameworkName::new(first));

        let mut version = None;
        let mut profile = None;

        for (index, part) in parts.iter().enumerate().skip(1) {
            if let Some((key, value)) = part.split_once('=') {
                let key = key.trim();
                let value = value.trim();
                if key.eq_ignore_ascii_case("version") {
                    if version.is_some() {
                        return Err(ParseError::InvalidToken(token.to_string()));
                    }
                    version = Some(parse_long_version(value)?);
                } else if key.eq_ignore_ascii_case("profile") {
                    if profile.is_some() {
                        return Err(ParseError::InvalidToken(token.to_string()));
                    }
                    profile = Some(value);
                } else {
                    tracing::debug!(token, key, "Ignoring framework name component");
                }
            } else if index == 1 && part.starts_with(['v', 'V']) {
                version = Some(parse_long_version(part)?);
            } else {
                return Err(ParseError::InvalidToken(token.to_string()));
            }
        }

        let version = version.unwrap_or(FrameworkVersion::EMPTY);

        if name.is(ids::PORTABLE) {
            let profile = profile.unwrap_or_default();
            if profile.contains('-') {
                return Err(ParseError::InvalidPortableFramework(token.to_string()));
            }
            let profile = self.parse_portable_profile(profile, token)?;
            return Ok(FrameworkIdentity::portable(version, profile));
        }

        let profile = profile.unwrap_or_default();
        let profile = self.profile(&name, profile).unwrap_or(profile);
        Ok(FrameworkIdentity::with_profile(name, version, profile))
    }

    /// Resolve the profile part of a portable framework: either a
    /// `ProfileNNN` reference or a `+`-separated list of folder names.
    fn parse_portable_profile(&self, profile: &str, token: &str) -> Result<PortableProfile, ParseError> {
        let profile = profile.trim();

        if let Some(number) = profile_number(profile) {
            let number = number?;
            return self
                .numbered_portable_profile(number)
                .ok_or_else(|| ParseError::UnknownPortableProfile(profile.to_string()));
        }

        let mut frameworks = Vec::new();
        for piece in profile.split('+').map(str::trim) {
            if piece.is_empty() {
                return Err(ParseError::InvalidPortableFramework(token.to_string()));
            }
            let nested = RawFolderName::scan(piece).is_some_and(|raw| {
                self.identifier(raw.identifier)
                    .is_some_and(|name| name.is(ids::PORTABLE))
            });
            if nested {
                return Err(ParseError::NestedPortable(token.to_string()));
            }
            frameworks.push(self.parse_folder_name(piece)?);
        }

        Ok(self.portable_profile_for(&frameworks))
    }
}

impl FromStr for FrameworkIdentity {
    type Err = ParseError;

    /// Parse with the built-in mappings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::default_provider().parse(s)
    }
}
