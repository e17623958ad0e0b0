use std::{error::Error, io, io::Write, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use namehash_config::{Defaults, Options};
use namehash_core::{Digest, DigestLength, NameHasher};

use crate::{batch::batch, demo::demo};

mod batch;
mod demo;
mod repl;

#[derive(Debug, Parser)]
#[command(name = "namehash", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file to read defaults from, instead of the one in the user config directory.
    #[arg(long, env("NAMEHASH_CONFIG"))]
    pub config: Option<PathBuf>,

    /// Print debug logging to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Action,
}

#[derive(Clone, Debug, Default, Args)]
pub struct HashArgs {
    /// Number of hex digits in the digest, between 1 and 8.
    #[arg(short, long)]
    pub length: Option<DigestLength>,

    /// Text prepended to the input before hashing.
    #[arg(short, long)]
    pub salt: Option<String>,
}

#[derive(Clone, Debug, Default, Args)]
pub struct NameArgs {
    #[command(flatten)]
    pub hash: HashArgs,

    /// Transliterate accented and other non-ASCII characters to plain ASCII.
    #[arg(
        short = 'a',
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub cast_ascii: Option<bool>,
}

impl HashArgs {
    fn length(&self, defaults: &Defaults) -> Result<DigestLength, Box<dyn Error>> {
        match self.length {
            Some(length) => Ok(length),
            None => Ok(defaults.length()?),
        }
    }

    fn salt(&self, defaults: &Defaults) -> Option<String> {
        self.salt.clone().or_else(|| defaults.salt.clone())
    }
}

impl NameArgs {
    fn hasher(&self, defaults: &Defaults) -> Result<NameHasher, Box<dyn Error>> {
        let cast_ascii = self.cast_ascii.unwrap_or_else(|| defaults.cast_ascii());
        let hasher = NameHasher::new()
            .with_length(self.hash.length(defaults)?)
            .cast_ascii(cast_ascii);

        Ok(match self.hash.salt(defaults) {
            Some(salt) => hasher.salt(salt),
            None => hasher,
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Normalize a name and print its ID.
    Id {
        name: String,

        #[command(flatten)]
        args: NameArgs,
    },
    /// Hash text as-is, without normalizing it.
    Hash {
        text: String,

        #[command(flatten)]
        args: HashArgs,
    },
    /// Print the canonical form of a name.
    Canon {
        name: String,

        /// Transliterate accented and other non-ASCII characters to plain ASCII.
        #[arg(
            short = 'a',
            long,
            num_args = 0..=1,
            require_equals = true,
            default_missing_value = "true"
        )]
        cast_ascii: Option<bool>,
    },
    /// Print an ID for every line of a file, or of stdin.
    Batch {
        /// File with one name per line. Reads stdin when omitted.
        input: Option<PathBuf>,

        /// File to write `name<TAB>id` lines to. Writes to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        args: NameArgs,
    },
    /// Print the self-check comparisons.
    Demo,

    Repl,
}

impl Action {
    pub fn run(self, defaults: &Defaults, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        match self {
            Action::Id { name, args } => {
                let hasher = args.hasher(defaults)?;
                writeln!(out, "{}", hasher.id(&name))?;
            }
            Action::Hash { text, args } => {
                let salt = args.salt(defaults);
                let digest = Digest::compute(&text, args.length(defaults)?, salt.as_deref());
                writeln!(out, "{digest}")?;
            }
            Action::Canon { name, cast_ascii } => {
                let cast_ascii = cast_ascii.unwrap_or_else(|| defaults.cast_ascii());
                writeln!(out, "{}", namehash_core::normalize(&name, cast_ascii))?;
            }
            Action::Batch {
                input,
                output,
                args,
            } => {
                let hasher = args.hasher(defaults)?;
                let count = batch(&hasher, input.as_deref(), output.as_deref(), out)?;
                tracing::info!("hashed {count} names");
            }
            Action::Demo => {
                demo(out)?;
            }
            Action::Repl => {
                repl::begin(defaults, out)?;
            }
        }

        Ok(())
    }
}

pub fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let Cli {
        config,
        command: action,
        ..
    } = cli;

    let options = match config {
        Some(path) => Options::load_from(path)?,
        None => Options::load()?,
    };
    options.make_current();

    let options = Options::current();
    let stdout = io::stdout();
    action.run(&options.defaults, &mut stdout.lock())
}

#[cfg(test)]
mod test {
    use super::*;

    fn run_args(args: &[&str], defaults: &Defaults) -> String {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let mut out = Vec::<u8>::new();
        cli.command.run(defaults, &mut out).unwrap();

        String::from_utf8(out).unwrap()
    }

    #[test]
    pub fn prints_ids() {
        let defaults = Defaults::default();

        assert_eq!(
            run_args(&["namehash", "id", "Maria  D.Assunção ", "-l", "4", "-a"], &defaults),
            "1F77\n"
        );
        assert_eq!(
            run_args(&["namehash", "id", "MARIA D ASSUNCAO", "--length", "4"], &defaults),
            "1F77\n"
        );
    }

    #[test]
    pub fn prints_raw_hashes() {
        let defaults = Defaults::default();

        assert_eq!(
            run_args(&["namehash", "hash", "world", "-s", "hello "], &defaults),
            "D58B3FA7\n"
        );
        assert_eq!(
            run_args(&["namehash", "hash", "hello world", "-l", "4"], &defaults),
            "EA2C\n"
        );
    }

    #[test]
    pub fn prints_canonical_names() {
        let defaults = Defaults::default();

        assert_eq!(
            run_args(&["namehash", "canon", "  j.r.r.   tolkien "], &defaults),
            "J R R TOLKIEN\n"
        );
    }

    #[test]
    pub fn flags_override_config_defaults() {
        let defaults = Defaults {
            length: Some(4),
            salt: None,
            cast_ascii: Some(true),
        };

        assert_eq!(
            run_args(&["namehash", "id", "Maria  D.Assunção "], &defaults),
            "1F77\n"
        );
        assert_eq!(
            run_args(&["namehash", "canon", "Müller", "--cast-ascii=false"], &defaults),
            "MÜLLER\n"
        );
        assert_eq!(
            run_args(&["namehash", "hash", "hello world", "-l", "8"], &defaults),
            "D58B3FA7\n"
        );
    }

    #[test]
    pub fn rejects_invalid_lengths() {
        assert!(Cli::try_parse_from(["namehash", "id", "ANA", "-l", "0"]).is_err());
        assert!(Cli::try_parse_from(["namehash", "hash", "ANA", "-l", "9"]).is_err());
    }

    #[test]
    pub fn invalid_config_length_is_an_error() {
        let defaults = Defaults {
            length: Some(10),
            ..Defaults::default()
        };
        let cli = Cli::try_parse_from(["namehash", "id", "ANA"]).unwrap();

        assert!(cli.command.run(&defaults, &mut Vec::<u8>::new()).is_err());
    }
}
