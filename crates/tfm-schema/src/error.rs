//! Errors raised at the parse boundary.

/// A framework token could not be parsed.
///
/// This is the only recoverable error the engine exposes; compatibility and
/// reduction operate on already-parsed identities and never fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token was empty or only whitespace.
    #[error("Framework token is empty")]
    Empty,

    /// The token matches neither the folder-name nor the long-name grammar.
    #[error("Invalid framework token: '{0}'")]
    InvalidToken(String),

    /// The version portion could not be read.
    #[error("Invalid framework version: '{0}'")]
    InvalidVersion(String),

    /// A `ProfileNNN` reference that is not in the portable profile table.
    #[error("Unknown portable profile: '{0}'")]
    UnknownPortableProfile(String),

    /// A portable framework list was empty or had a malformed entry.
    #[error("Invalid portable framework list: '{0}'")]
    InvalidPortableFramework(String),

    /// A portable framework list contained another portable framework.
    #[error("Portable frameworks cannot be nested: '{0}'")]
    NestedPortable(String),

    /// A `%` escape did not decode to valid UTF-8.
    #[error("Invalid escape sequence in framework token: '{0}'")]
    InvalidEscape(String),
}
