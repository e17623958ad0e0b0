use std::{error::Error, io::Write};

use namehash_core::{fnv1a_32, name2id};

/// Print the two self-check comparisons: a salted hash against the plain concatenation, and an
/// ASCII-cast name against its canonical spelling.
pub fn demo(out: &mut dyn Write) -> Result<(), Box<dyn Error>> {
    let hash1 = fnv1a_32("hello world", 8, None)?;
    let hash2 = fnv1a_32("world", 8, Some("hello "))?;
    writeln!(out, "{hash1} == {hash2}")?;

    let hash1 = name2id("Maria  D.Assunção ", 4, None, true)?;
    let hash2 = name2id("MARIA D ASSUNCAO", 4, None, false)?;
    writeln!(out, "    {hash1} == {hash2}")?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    pub fn both_sides_match() {
        let mut out = Vec::<u8>::new();
        demo(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "D58B3FA7 == D58B3FA7\n    1F77 == 1F77\n"
        );
    }
}
