pub mod core {
    pub use namehash_core::*;
}

pub mod config {
    pub use namehash_config::*;
}

pub mod prelude {
    pub use super::core::{
        fnv1a_32, name2id, normalize, Canonical, Digest, DigestError, DigestLength, NameHasher,
        Transliterate,
    };
}
