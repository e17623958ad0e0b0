use std::{fmt, num::ParseIntError, str::FromStr};

use thiserror::Error;

use crate::fnv::Fnv1a32;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DigestError {
    #[error("'length' must be an integer between 1 and 8 (inclusive), got {0}")]
    InvalidLength(usize),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseDigestError {
    #[error("Digest has an invalid length")]
    Length(#[from] DigestError),

    #[error("Digest is not hexadecimal")]
    NotHex,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseLengthError {
    #[error("Length is not a number")]
    NotANumber(#[from] ParseIntError),

    #[error(transparent)]
    OutOfRange(#[from] DigestError),
}

/// Number of hexadecimal digits in a digest, always within `1..=8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DigestLength(u8);

impl DigestLength {
    pub const MIN: DigestLength = DigestLength(1);
    pub const MAX: DigestLength = DigestLength(8);

    pub fn new(digits: usize) -> Result<Self, DigestError> {
        match u8::try_from(digits) {
            Ok(digits @ 1..=8) => Ok(DigestLength(digits)),
            _ => Err(DigestError::InvalidLength(digits)),
        }
    }

    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Width of the digest in bits.
    pub const fn bits(self) -> u32 {
        self.0 as u32 * 4
    }

    pub const fn mask(self) -> u32 {
        match self.bits() {
            32 => u32::MAX,
            bits => (1 << bits) - 1,
        }
    }
}

impl Default for DigestLength {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<usize> for DigestLength {
    type Error = DigestError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for DigestLength {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.parse::<usize>()?;

        Ok(Self::new(digits)?)
    }
}

impl fmt::Display for DigestLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// XOR-fold a 32-bit hash down to `length` hex digits.
///
/// The bits above the digest width are shifted down and mixed into the low bits so the whole
/// hash contributes to short digests.
pub fn fold(hash: u32, length: DigestLength) -> u32 {
    match length.bits() {
        32 => hash,
        bits => ((hash >> bits) ^ hash) & length.mask(),
    }
}

/// A folded hash together with the number of digits it is formatted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Digest {
    value: u32,
    length: DigestLength,
}

impl Digest {
    /// Hash `salt + text` and fold the result to `length` digits.
    pub fn compute(text: &str, length: DigestLength, salt: Option<&str>) -> Self {
        let mut hasher = Fnv1a32::new();
        if let Some(salt) = salt {
            hasher.write_str(salt);
        }
        hasher.write_str(text);

        let hash = hasher.finish32();
        log::trace!("fnv1a_32({text:?}, salt = {salt:?}) = {hash:#010X}");

        Self::from_hash(hash, length)
    }

    pub fn from_hash(hash: u32, length: DigestLength) -> Self {
        Digest {
            value: fold(hash, length),
            length,
        }
    }

    pub const fn value(&self) -> u32 {
        self.value
    }

    pub const fn length(&self) -> DigestLength {
        self.length
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$X}", self.value, width = self.length.get())
    }
}

impl FromStr for Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let length = DigestLength::new(s.len())?;
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseDigestError::NotHex);
        }

        let value = u32::from_str_radix(s, 16).map_err(|_| ParseDigestError::NotHex)?;

        Ok(Digest { value, length })
    }
}

/// Hash `text`, prefixed by `salt` when given, into a digest of `length` uppercase hex digits.
pub fn digest(text: &str, length: usize, salt: Option<&str>) -> Result<String, DigestError> {
    let length = DigestLength::new(length)?;

    Ok(Digest::compute(text, length, salt).to_string())
}
