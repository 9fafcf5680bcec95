use std::cmp::Ordering;
use std::fmt;

use crate::error::IdentifierError;
use crate::keys::MAX_IDENTIFIER_LEN;

/// A bounded-length key stored inline, without heap allocation.
///
/// Identifiers hold at most [`MAX_IDENTIFIER_LEN`] bytes and order byte-wise, the same order
/// `strcmp` gives for C strings. Conversions from `&str` and `String` truncate silently; use
/// [`Identifier::try_new`] when an over-long key should be an error instead.
///
/// Truncation always lands on a UTF-8 character boundary, so an identifier is valid text.
///
/// ```rust
/// use avlstore::keys::identifier::Identifier;
///
/// let short: Identifier = "alice".into();
/// assert_eq!(short.as_str(), "alice");
///
/// let long: Identifier = "a-very-long-identifier-name".into();
/// assert_eq!(long.as_str(), "a-very-long-identif");
/// assert!(Identifier::try_new("a-very-long-identifier-name").is_err());
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Identifier {
    data: [u8; MAX_IDENTIFIER_LEN],
    len: u8,
}

impl Identifier {
    /// Builds an identifier, truncating `s` to the longest prefix that fits.
    pub fn new(s: &str) -> Self {
        let mut end = s.len().min(MAX_IDENTIFIER_LEN);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        Self::from_prefix(&s.as_bytes()[..end])
    }

    /// Builds an identifier, failing instead of truncating.
    pub fn try_new(s: &str) -> Result<Self, IdentifierError> {
        if s.len() > MAX_IDENTIFIER_LEN {
            return Err(IdentifierError::TooLong {
                len: s.len(),
                max: MAX_IDENTIFIER_LEN,
            });
        }
        Ok(Self::from_prefix(s.as_bytes()))
    }

    fn from_prefix(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= MAX_IDENTIFIER_LEN);
        let mut data = [0; MAX_IDENTIFIER_LEN];
        data[..bytes.len()].copy_from_slice(bytes);
        Self {
            data,
            len: bytes.len() as u8,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }

    pub fn as_str(&self) -> &str {
        // Construction only ever cuts on a char boundary.
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Only the used portion takes part in the comparison.
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl AsRef<[u8]> for Identifier {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Identifier {
    fn from(data: &str) -> Self {
        Self::new(data)
    }
}

impl From<&String> for Identifier {
    fn from(data: &String) -> Self {
        Self::new(data)
    }
}

impl From<String> for Identifier {
    fn from(data: String) -> Self {
        Self::new(&data)
    }
}

impl From<&Identifier> for Identifier {
    fn from(data: &Identifier) -> Self {
        *data
    }
}
