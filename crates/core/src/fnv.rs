use std::hash::{BuildHasherDefault, Hasher};

/// FNV-1a 32-bit offset basis.
pub const OFFSET_BASIS: u32 = 0x811C_9DC5;

/// FNV-1a 32-bit prime.
pub const PRIME: u32 = 0x0100_0193;

/// Streaming 32-bit FNV-1a hasher.
///
/// Writes are concatenative: hashing `"hello "` followed by `"world"` gives the same state as
/// hashing `"hello world"` in one go, which is what makes salting a plain prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fnv1a32(u32);

/// A [`std::hash::BuildHasher`] producing [`Fnv1a32`] hashers.
pub type BuildFnv1a32 = BuildHasherDefault<Fnv1a32>;

impl Fnv1a32 {
    pub const fn new() -> Self {
        Fnv1a32(OFFSET_BASIS)
    }

    pub fn write_str(&mut self, text: &str) {
        Hasher::write(self, text.as_bytes());
    }

    /// The current 32-bit hash value.
    pub const fn finish32(&self) -> u32 {
        self.0
    }
}

impl Default for Fnv1a32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1a32 {
    fn write(&mut self, bytes: &[u8]) {
        self.0 = bytes.iter().fold(self.0, |hash, &byte| {
            (hash ^ u32::from(byte)).wrapping_mul(PRIME)
        });
    }

    fn finish(&self) -> u64 {
        u64::from(self.0)
    }
}

/// Hash `bytes` in one shot.
pub fn fnv1a32(bytes: &[u8]) -> u32 {
    let mut hasher = Fnv1a32::new();
    hasher.write(bytes);
    hasher.finish32()
}
