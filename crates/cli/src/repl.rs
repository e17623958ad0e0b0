use std::{error::Error, io::Write, path::PathBuf};

use clap::{FromArgMatches, Subcommand};
use namehash_config::{Defaults, Options};
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::Action;

fn history_path() -> Option<PathBuf> {
    Options::path().map(|path| path.with_file_name("history.txt"))
}

pub fn process_input(
    input: &str,
    defaults: &Defaults,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    let args = shlex::split(input).ok_or("failed to parse input")?;

    let command = Action::augment_subcommands(clap::Command::new("repl").no_binary_name(true));
    let action = command
        .try_get_matches_from(args)
        .and_then(|matches| Action::from_arg_matches(&matches))
        .map_err(|e| e.to_string())?;

    match action {
        Action::Repl => {
            writeln!(out, "Already running repl.")?;
            Ok(())
        }
        Action::Batch { input: None, .. } => {
            Err("batch needs an input file inside the repl".into())
        }
        action => action.run(defaults, out),
    }
}

pub fn begin(defaults: &Defaults, out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    let mut rl = DefaultEditor::new()?;
    let history = history_path();
    if let Some(history) = &history {
        let _ = rl.load_history(history);
    }

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;

                if let Err(e) = process_input(&line, defaults, out) {
                    writeln!(out, "{e}")?;
                }
            }
            Err(ReadlineError::Interrupted) => {
                writeln!(out, "^C")?;
                continue;
            }
            Err(ReadlineError::Eof) => {
                writeln!(out, "^D")?;
                break;
            }
            Err(err) => {
                tracing::error!("readline failed: {err:?}");
                break;
            }
        }

        if let Some(history) = &history {
            if let Err(e) = rl.save_history(history) {
                tracing::debug!("couldn't save history to {}: {e}", history.display());
            }
        }
    }

    Ok(())
}
