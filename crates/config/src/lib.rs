use std::{
    env, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
    sync::{Arc, RwLock},
};

use directories::ProjectDirs;
use namehash_core::DigestError;
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::defaults::Defaults;

mod defaults;

pub const LENGTH_ENV: &str = "NAMEHASH_LENGTH";
pub const SALT_ENV: &str = "NAMEHASH_SALT";
pub const CAST_ASCII_ENV: &str = "NAMEHASH_CAST_ASCII";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Couldn't determine config directory")]
    NoConfigDir,

    #[error("Failed to access settings file")]
    Io(#[from] io::Error),

    #[error("Settings file is not valid TOML")]
    Decode(#[from] toml::de::Error),

    #[error("Settings could not be serialized")]
    Encode(#[from] toml::ser::Error),

    #[error("Invalid default length")]
    Length(#[from] DigestError),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Options {
    #[serde(default)]
    pub defaults: Defaults,
}

thread_local! {
    static CURRENT_CONFIG: RwLock<Arc<Options>> = RwLock::new(Default::default());
}

fn env_override_str<T: FromStr>(value: &mut Option<T>, env_name: &str) {
    if let Ok(env_var) = env::var(env_name) {
        match T::from_str(&env_var) {
            Ok(parsed) => *value = Some(parsed),
            Err(_) => log::warn!("ignoring unparseable {env_name}={env_var:?}"),
        }
    }
}

impl Options {
    pub fn path() -> Option<PathBuf> {
        const SETTINGS_FILENAME: &str = "settings.toml";

        let dirs = ProjectDirs::from("io.github", "leogama", "namehash")?;
        let config_dir = dirs.config_dir();

        Some(config_dir.join(SETTINGS_FILENAME))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let options = toml::from_str::<Options>(contents)?;
        options.defaults.validate()?;

        Ok(options)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::path().ok_or(ConfigError::NoConfigDir)?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        self.save_to(config_path)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let output = toml::to_string_pretty(self)?;
        fs::write(path, output)?;

        Ok(())
    }

    /// Load the settings file from the platform config directory, falling back to defaults when
    /// it is missing or invalid, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut options = match Self::path() {
            Some(config_path) => match Self::read(&config_path) {
                Ok(options) => options,
                Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                    Options::default()
                }
                Err(e) => {
                    log::warn!("ignoring settings at {}: {e}", config_path.display());
                    Options::default()
                }
            },
            None => Options::default(),
        };

        options.apply_env();
        options.defaults.validate()?;

        Ok(options)
    }

    /// Load settings from an explicit path. Unlike [`Options::load`], a missing or invalid file is
    /// an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut options = Self::read(path.as_ref())?;

        options.apply_env();
        options.defaults.validate()?;

        Ok(options)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        log::debug!("read settings from {}", path.display());

        Self::from_toml_str(&contents)
    }

    pub fn apply_env(&mut self) {
        env_override_str(&mut self.defaults.length, LENGTH_ENV);
        env_override_str(&mut self.defaults.salt, SALT_ENV);
        env_override_str(&mut self.defaults.cast_ascii, CAST_ASCII_ENV);
    }

    pub fn current() -> Arc<Options> {
        CURRENT_CONFIG.with(|c| c.read().map(|c| c.clone()).unwrap_or_default())
    }

    pub fn make_current(self) {
        CURRENT_CONFIG.with(|c| {
            if let Ok(mut current) = c.write() {
                *current = Arc::new(self);
            }
        });
    }
}

#[cfg(test)]
mod test {
    use namehash_core::DigestLength;

    use super::*;

    #[test]
    pub fn empty_file_uses_defaults() {
        let options = Options::from_toml_str("").unwrap();

        assert_eq!(options, Options::default());
        assert_eq!(options.defaults.length().unwrap(), DigestLength::MAX);
        assert!(!options.defaults.cast_ascii());
    }

    #[test]
    pub fn reads_defaults_table() {
        let options = Options::from_toml_str(
            r#"
            [defaults]
            length = 4
            salt = "2022 "
            cast_ascii = true
            "#,
        )
        .unwrap();

        assert_eq!(options.defaults.length, Some(4));
        assert_eq!(options.defaults.salt.as_deref(), Some("2022 "));

        let hasher = options.defaults.name_hasher().unwrap();
        assert_eq!(
            Ok(hasher.id("José da Silva")),
            namehash_core::name2id("José da Silva", 4, Some("2022 "), true)
        );
    }

    #[test]
    pub fn rejects_out_of_range_length() {
        let result = Options::from_toml_str("[defaults]\nlength = 12\n");

        assert!(matches!(
            result,
            Err(ConfigError::Length(DigestError::InvalidLength(12)))
        ));
    }

    #[test]
    pub fn rejects_malformed_toml() {
        assert!(matches!(
            Options::from_toml_str("[defaults\n"),
            Err(ConfigError::Decode(_))
        ));
    }

    #[test]
    pub fn round_trips_through_a_file() {
        let path = env::temp_dir().join(format!("namehash-settings-{}.toml", std::process::id()));
        let options = Options {
            defaults: Defaults {
                length: Some(6),
                salt: None,
                cast_ascii: Some(true),
            },
        };

        options.save_to(&path).unwrap();
        let loaded = Options::read(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, options);
    }

    #[test]
    pub fn current_options_are_per_thread() {
        let options = Options::from_toml_str("[defaults]\nlength = 3\n").unwrap();
        options.clone().make_current();

        assert_eq!(*Options::current(), options);
        std::thread::spawn(|| assert_eq!(*Options::current(), Options::default()))
            .join()
            .unwrap();
    }
}
