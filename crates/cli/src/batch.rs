use std::{
    error::Error,
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use namehash_core::NameHasher;
use rayon::prelude::*;

/// Hash every line of `names` into a `name<TAB>id` row. Empty lines stay empty.
///
/// Rows come back in input order.
pub fn hash_lines(hasher: &NameHasher, names: &[&str], progress: ProgressBar) -> Vec<String> {
    names
        .par_iter()
        .progress_with(progress)
        .map(|name| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\t{}", hasher.id(name))
            }
        })
        .collect()
}

fn write_rows(rows: &[String], out: &mut dyn Write) -> io::Result<()> {
    for row in rows {
        writeln!(out, "{row}")?;
    }

    out.flush()
}

/// Hash the names in `input` (or stdin) and write them to `output` (or `out`).
///
/// Returns the number of names hashed.
pub fn batch(
    hasher: &NameHasher,
    input: Option<&Path>,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<usize, Box<dyn Error>> {
    let contents = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut contents = String::new();
            io::stdin().lock().read_to_string(&mut contents)?;
            contents
        }
    };

    let names = contents.lines().collect::<Vec<_>>();
    tracing::debug!("read {} lines", names.len());

    let progress = match output {
        Some(_) => {
            let style = ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40} {pos:>7}/{len:7} {msg}",
            )?;
            ProgressBar::new(names.len() as u64).with_style(style)
        }
        None => ProgressBar::hidden(),
    };

    let rows = hash_lines(hasher, &names, progress);
    let count = rows.iter().filter(|row| !row.is_empty()).count();

    match output {
        Some(path) => write_rows(&rows, &mut BufWriter::new(File::create(path)?))?,
        None => write_rows(&rows, out)?,
    }

    Ok(count)
}
