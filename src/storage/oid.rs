use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// The unique identifier of a row in a SISTEMA project document.
///
/// SISTEMA assigns every row an opaque `oid` attribute, and rows refer to
/// each other (parents, applied measures) by these identifiers. The only
/// structural guarantee is that an identifier is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid(NonEmptyString);

impl Oid {
    /// Creates a new `Oid` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyOidError`] if the string is empty.
    pub fn new(s: String) -> Result<Self, EmptyOidError> {
        NonEmptyString::new(s).map(Self).map_err(|_| EmptyOidError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<&str> for Oid {
    type Error = EmptyOidError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for Oid {
    type Err = EmptyOidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// `Hash` on the wrapped string matches `str`, so lookups by `&str` are sound.
impl Borrow<str> for Oid {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Deref for Oid {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a row identifier is empty.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("row identifiers must not be empty")]
pub struct EmptyOidError;
