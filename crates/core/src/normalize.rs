use std::{fmt, ops::Deref};

/// A strategy for replacing non-ASCII characters with plain ASCII approximations.
pub trait Transliterate {
    fn transliterate(&self, text: &str) -> String;
}

impl<F: Fn(&str) -> String> Transliterate for F {
    fn transliterate(&self, text: &str) -> String {
        self(text)
    }
}

/// Table-driven transliteration backed by the `deunicode` crate.
///
/// Characters without an ASCII approximation are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct Deunicode;

impl Transliterate for Deunicode {
    fn transliterate(&self, text: &str) -> String {
        deunicode::deunicode_with_tofu(text, "")
    }
}

/// A name in canonical form, ready to be hashed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Canonical(String);

impl Canonical {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for Canonical {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Canonical {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Canonical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unicode whitespace plus the ASCII information separators (U+001C to U+001F).
fn is_space(ch: char) -> bool {
    ch.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&ch)
}

/// Replace every run of whitespace with a single space.
///
/// Runs at the edges are kept as a single space, matching a `\s+` substitution.
fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_run = false;

    for ch in text.chars() {
        if is_space(ch) {
            if !in_run {
                collapsed.push(' ');
            }
            in_run = true;
        } else {
            collapsed.push(ch);
            in_run = false;
        }
    }

    collapsed
}

/// Canonicalize `name`, transliterating it with `transliterator` when one is given.
pub fn normalize_with(name: &str, transliterator: Option<&dyn Transliterate>) -> Canonical {
    let upper = name.to_uppercase();
    let spaced = upper.trim_matches(is_space).replace('.', " ");
    let collapsed = collapse_whitespace(&spaced);

    let canonical = match transliterator {
        Some(transliterator) if !collapsed.is_ascii() => transliterator.transliterate(&collapsed),
        _ => collapsed,
    };

    log::debug!("normalized {name:?} to {canonical:?}");

    Canonical(canonical)
}

/// Canonicalize `name`, folding it to ASCII with [`Deunicode`] when `cast_ascii` is set.
pub fn normalize(name: &str, cast_ascii: bool) -> Canonical {
    let transliterator = cast_ascii.then_some(&Deunicode as &dyn Transliterate);

    normalize_with(name, transliterator)
}
