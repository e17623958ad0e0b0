use std::fmt;

pub use self::{
    digest::{
        digest, fold, Digest, DigestError, DigestLength, ParseDigestError, ParseLengthError,
    },
    fnv::{fnv1a32, BuildFnv1a32, Fnv1a32},
    normalize::{normalize, normalize_with, Canonical, Deunicode, Transliterate},
};

pub mod digest;
pub mod fnv;
pub mod normalize;

/// Hash `text` as-is into a digest of `length` hex digits, prefixing it with `salt` when given.
pub fn fnv1a_32(text: &str, length: usize, salt: Option<&str>) -> Result<String, DigestError> {
    digest(text, length, salt)
}

/// Normalize `name` and hash the canonical form into a digest of `length` hex digits.
pub fn name2id(
    name: &str,
    length: usize,
    salt: Option<&str>,
    cast_ascii: bool,
) -> Result<String, DigestError> {
    let length = DigestLength::new(length)?;
    let canonical = normalize(name, cast_ascii);

    Ok(Digest::compute(&canonical, length, salt).to_string())
}

/// Reusable settings for turning names into IDs.
///
/// The digest length is validated once when it is set, so hashing through a `NameHasher` can't
/// fail.
///
/// ```
/// use namehash_core::NameHasher;
///
/// let hasher = NameHasher::new().length(4)?.cast_ascii(true);
/// assert_eq!(hasher.id("Maria  D.Assunção "), hasher.id("MARIA D ASSUNCAO"));
/// # Ok::<_, namehash_core::DigestError>(())
/// ```
#[derive(Default)]
pub struct NameHasher {
    length: DigestLength,
    salt: Option<String>,
    cast_ascii: bool,
    transliterator: Option<Box<dyn Transliterate + Send + Sync>>,
}

impl NameHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn length(mut self, length: usize) -> Result<Self, DigestError> {
        self.length = DigestLength::new(length)?;
        Ok(self)
    }

    pub fn with_length(mut self, length: DigestLength) -> Self {
        self.length = length;
        self
    }

    pub fn salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    pub fn cast_ascii(mut self, cast_ascii: bool) -> Self {
        self.cast_ascii = cast_ascii;
        self
    }

    /// Use `transliterator` instead of [`Deunicode`] when casting to ASCII.
    pub fn transliterator(
        mut self,
        transliterator: impl Transliterate + Send + Sync + 'static,
    ) -> Self {
        self.transliterator = Some(Box::new(transliterator));
        self
    }

    pub fn canonical(&self, name: &str) -> Canonical {
        match (&self.transliterator, self.cast_ascii) {
            (Some(transliterator), true) => {
                normalize_with(name, Some(&**transliterator as &dyn Transliterate))
            }
            (_, cast_ascii) => normalize(name, cast_ascii),
        }
    }

    pub fn hash(&self, name: &str) -> Digest {
        Digest::compute(&self.canonical(name), self.length, self.salt.as_deref())
    }

    pub fn id(&self, name: &str) -> String {
        self.hash(name).to_string()
    }
}

impl fmt::Debug for NameHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameHasher")
            .field("length", &self.length)
            .field("salt", &self.salt)
            .field("cast_ascii", &self.cast_ascii)
            .field("custom_transliterator", &self.transliterator.is_some())
            .finish()
    }
}
