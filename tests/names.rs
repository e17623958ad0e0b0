use std::error::Error;

use insta::assert_snapshot;
use libtest_mimic::{Arguments, Failed, Trial};
use namehash::prelude::*;

#[derive(Clone, Copy, Debug)]
enum Expectation {
    Equal,
    Distinct,
}

fn pairs() -> impl Iterator<Item = (&'static str, Expectation, &'static str)> {
    include_str!("data/equivalent_names.txt")
        .lines()
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|line| {
            line.split_once(" == ")
                .map(|(left, right)| (left, Expectation::Equal, right))
                .or_else(|| {
                    line.split_once(" != ")
                        .map(|(left, right)| (left, Expectation::Distinct, right))
                })
        })
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Arguments::from_args();
    let pairs = pairs().collect::<Vec<_>>();

    assert_snapshot!("fixture_pairs", pairs.len().to_string());

    let tests = pairs
        .into_iter()
        .map(|(left, expectation, right)| {
            Trial::test(format!("{left:?} {expectation:?} {right:?}"), move || {
                check_pair(left, expectation, right)
            })
            .with_kind("names")
        })
        .collect();

    libtest_mimic::run(&args, tests).exit();
}

fn check_pair(left: &str, expectation: Expectation, right: &str) -> Result<(), Failed> {
    match expectation {
        Expectation::Equal => {
            for length in 1..=8 {
                let left_id = name2id(left, length, None, true)?;
                let right_id = name2id(right, length, None, true)?;

                if left_id != right_id {
                    return Err(format!(
                        "{left_id} != {right_id} at length {length} ({:?} vs {:?})",
                        normalize(left, true),
                        normalize(right, true)
                    )
                    .into());
                }
            }
        }
        Expectation::Distinct => {
            let left_id = name2id(left, 8, None, true)?;
            let right_id = name2id(right, 8, None, true)?;

            if left_id == right_id {
                return Err(format!("{left:?} and {right:?} both hash to {left_id}").into());
            }
        }
    }

    Ok(())
}
