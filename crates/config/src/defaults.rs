use namehash_core::{DigestLength, NameHasher};
use serde_derive::{Deserialize, Serialize};

use crate::ConfigError;

/// Default hashing settings, used wherever a command line flag is not given.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Defaults {
    pub length: Option<usize>,
    pub salt: Option<String>,
    pub cast_ascii: Option<bool>,
}

impl Defaults {
    pub fn length(&self) -> Result<DigestLength, ConfigError> {
        match self.length {
            Some(length) => Ok(DigestLength::new(length)?),
            None => Ok(DigestLength::default()),
        }
    }

    pub fn cast_ascii(&self) -> bool {
        self.cast_ascii.unwrap_or(false)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.length().map(|_| ())
    }

    pub fn name_hasher(&self) -> Result<NameHasher, ConfigError> {
        let hasher = NameHasher::new()
            .with_length(self.length()?)
            .cast_ascii(self.cast_ascii());

        Ok(match &self.salt {
            Some(salt) => hasher.salt(salt.as_str()),
            None => hasher,
        })
    }
}
