//! Built-in self checks, run by `matgroups --test`.
//!
//! These let a user confirm that an installed binary produces the documented
//! output without needing the source tree.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::bdf::{parse_entries, render, tokens};
use crate::error::Error;
use crate::ranges::{BisectingCompressor, Compressor};
use crate::sets::{SetCollection, SetKind};

/// Seed for the randomized check, so every run checks the same inputs.
const RANDOM_SEED: u64 = 0x6d61_7467_726f_7570;

/// Number of random label sets checked.
const RANDOM_ROUNDS: usize = 200;

/// Outcome of a single self-test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    /// Short description of what the case checks
    pub name: &'static str,
    /// `Err` holds a description of the mismatch
    pub outcome: Result<(), String>,
}

/// Outcome of a full self-test run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Results in the order the cases ran
    pub cases: Vec<CaseResult>,
}

impl Report {
    /// Returns the number of failed cases.
    pub fn failures(&self) -> usize {
        self.cases.iter().filter(|case| case.outcome.is_err()).count()
    }

    /// Returns `Ok` if every case passed.
    pub fn into_result(self) -> Result<(), Error> {
        match self.failures() {
            0 => Ok(()),
            failed => Err(Error::SelfTest(failed)),
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for case in &self.cases {
            match &case.outcome {
                Ok(()) => writeln!(f, "ok     {}", case.name)?,
                Err(reason) => writeln!(f, "FAILED {}: {reason}", case.name)?,
            }
        }
        write!(
            f,
            "{} passed; {} failed",
            self.cases.len() - self.failures(),
            self.failures()
        )
    }
}

type Case = (&'static str, fn() -> Result<(), String>);

const CASES: &[Case] = &[
    ("runs of mixed lengths", check_mixed_runs),
    ("run tokens", check_tokens),
    ("two set document", check_two_set_document),
    ("empty input", check_empty),
    ("random label sets", check_random_sets),
];

/// Runs every self-test case and collects the results.
pub fn run() -> Report {
    let cases = CASES
        .iter()
        .map(|&(name, check)| {
            let outcome = check();
            match &outcome {
                Ok(()) => tracing::debug!(case = name, "self-test passed"),
                Err(reason) => tracing::error!(case = name, %reason, "self-test failed"),
            }
            CaseResult { name, outcome }
        })
        .collect();

    Report { cases }
}

fn expect_eq<T: PartialEq + std::fmt::Debug>(actual: T, expected: T) -> Result<(), String> {
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected {expected:?}, got {actual:?}"))
    }
}

fn check_mixed_runs() -> Result<(), String> {
    let runs = BisectingCompressor.compress(&[10, 11, 12, 1, 2, 3, 4, 17, 18, 20]);
    expect_eq(runs.to_pairs(), vec![(1, 4), (10, 12), (17, 18), (20, 20)])
}

fn check_tokens() -> Result<(), String> {
    let runs = BisectingCompressor.compress(&[10, 11, 12, 1, 2, 3, 4, 17, 18, 20]);
    let rendered: Vec<String> = tokens(&runs).iter().map(ToString::to_string).collect();
    expect_eq(
        rendered,
        ["1 THRU 4", "10 THRU 12", "17", "18", "20"].map(String::from).to_vec(),
    )
}

fn check_two_set_document() -> Result<(), String> {
    let sets: SetCollection = [
        ("SET_A", vec![10, 11, 12, 1, 2, 3, 4, 17, 18, 20]),
        ("SET_B", vec![2, 4, 6, 8, 10, 12, 14, 16, 18, 20]),
    ]
    .into_iter()
    .collect();

    let rendered = render(&sets, SetKind::Element).map_err(|err| err.to_string())?;
    expect_eq(
        rendered.as_str(),
        concat!(
            "CEND\n",
            "SET    1 = 1 THRU 4,10 THRU 12,17,18,20\n",
            "$HMSET        1        2 \"SET_A\"\n",
            "SET    2 = 2,4,6,8,10,12,14,16,\n",
            "18,20\n",
            "$HMSET        2        2 \"SET_B\"\n",
            "BEGIN BULK\n",
            "ENDDATA\n",
        ),
    )
}

fn check_empty() -> Result<(), String> {
    if !BisectingCompressor.compress(&[]).is_empty() {
        return Err("empty input produced runs".to_string());
    }

    let sets: SetCollection = [("EMPTY", Vec::<u64>::new())].into_iter().collect();
    let rendered = render(&sets, SetKind::Element).map_err(|err| err.to_string())?;
    expect_eq(
        rendered.as_str(),
        "CEND\nSET    1 = \n$HMSET        1        2 \"EMPTY\"\nBEGIN BULK\nENDDATA\n",
    )
}

/// Checks coverage, maximality and token round trip on seeded random sets.
fn check_random_sets() -> Result<(), String> {
    let mut rng = StdRng::seed_from_u64(RANDOM_SEED);

    for round in 0..RANDOM_ROUNDS {
        let len = rng.gen_range(0..500);
        let max = rng.gen_range(1..2_000u64);
        let values: Vec<u64> = (0..len).map(|_| rng.gen_range(0..max)).collect();
        let distinct: BTreeSet<u64> = values.iter().copied().collect();

        let runs = BisectingCompressor.compress(&values);

        let covered: BTreeSet<u64> = runs.values().collect();
        if covered != distinct {
            return Err(format!("round {round}: runs do not cover the input exactly"));
        }

        let pairs = runs.to_pairs();
        if let Some(pair) = pairs.windows(2).find(|pair| pair[1].0 <= pair[0].1 + 1) {
            return Err(format!("round {round}: runs {:?} and {:?} could merge", pair[0], pair[1]));
        }

        let line = tokens(&runs)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let parsed = parse_entries(&line).map_err(|err| format!("round {round}: {err}"))?;
        if parsed.into_iter().collect::<BTreeSet<_>>() != distinct {
            return Err(format!("round {round}: tokens do not parse back to the input"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_all_cases_pass() {
        let report = run();

        assert_eq!(report.cases.len(), CASES.len());
        assert_eq!(report.failures(), 0, "{report}");
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_report_counts_failures() {
        let report = Report {
            cases: vec![
                CaseResult { name: "good", outcome: Ok(()) },
                CaseResult { name: "bad", outcome: Err("nope".to_string()) },
            ],
        };

        assert_eq!(report.failures(), 1);
        assert_eq!(report.to_string(), "ok     good\nFAILED bad: nope\n1 passed; 1 failed");
        assert_matches!(report.into_result(), Err(Error::SelfTest(1)));
    }
}
