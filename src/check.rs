//! Check the formula against real squares: build each one, verify it's magic, and compare its sum
//! with `magic_constant(n, 2, a)`.

use crate::formula::magic_constant;
use crate::square::MagicSquare;
use crate::verify::{is_close, verify_square};
use crate::Config;
use rayon::prelude::*;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// How closely the built square's sum has to match the prediction, relative to the prediction.
pub const MATCH_TOLERANCE: f64 = 1e-10;

const RULE: &str = "==================================================";

/// One square to build and check.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub n: u32,
    pub start: f64,
    pub description: String,
}

impl TestCase {
    pub fn new(n: u32, start: f64, description: impl Into<String>) -> TestCase {
        TestCase {
            n,
            start,
            description: description.into(),
        }
    }
}

/// The standard cases.
pub fn default_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(3, 1.0, "Classical 3x3"),
        TestCase::new(3, 100.0, "3x3 starting at 100"),
        TestCase::new(5, 500.5, "5x5 starting at 500.5"),
        TestCase::new(7, 0.0, "7x7 starting at 0"),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaseOutcome {
    Passed { actual: f64, predicted: f64 },
    /// The built square wasn't magic, so there was nothing to compare.
    NotMagic,
    Mismatch { actual: f64, predicted: f64 },
    /// Building the square failed, or checking it panicked.
    Errored(String),
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed { .. })
    }

    /// `|actual - predicted|`, if there was anything to compare.
    pub fn abs_error(&self) -> Option<f64> {
        match self {
            CaseOutcome::Passed { actual, predicted }
            | CaseOutcome::Mismatch { actual, predicted } => Some((actual - predicted).abs()),
            CaseOutcome::NotMagic | CaseOutcome::Errored(_) => None,
        }
    }

    /// `|actual - predicted| / |predicted|`, if there was anything to compare.
    pub fn rel_error(&self) -> Option<f64> {
        match self {
            CaseOutcome::Passed { predicted, .. } | CaseOutcome::Mismatch { predicted, .. } => {
                self.abs_error().map(|err| err / predicted.abs())
            }
            CaseOutcome::NotMagic | CaseOutcome::Errored(_) => None,
        }
    }
}

/// Compare a square that was built for `case` against the formula.
fn compare(case: &TestCase, square: &MagicSquare) -> CaseOutcome {
    let verdict = verify_square(square);
    if !verdict.is_magic {
        return CaseOutcome::NotMagic;
    }

    let actual = verdict.constant;
    let predicted = magic_constant(case.n, 2, case.start);
    if is_close(actual, predicted, MATCH_TOLERANCE) {
        CaseOutcome::Passed { actual, predicted }
    } else {
        CaseOutcome::Mismatch { actual, predicted }
    }
}

fn check_case_logged(case: &TestCase, config: &Config) -> CaseOutcome {
    let square = match MagicSquare::siamese(case.n, case.start) {
        Ok(square) => square,
        Err(err) => return CaseOutcome::Errored(err.to_string()),
    };
    if config.log_squares {
        eprintln!("{}:\n{}", case.description, square);
    }
    compare(case, &square)
}

/// Build the square for `case`, verify it, and compare it with the formula.
pub fn check_case(case: &TestCase) -> CaseOutcome {
    check_case_logged(case, &Config::default())
}

/// Run every case. A case that errors or panics counts as a failure, and doesn't stop the others.
pub fn run_cases(cases: &[TestCase], config: &Config) -> Report {
    run_cases_with(cases, config, |case| check_case_logged(case, config))
}

fn run_cases_with<F>(cases: &[TestCase], config: &Config, check: F) -> Report
where
    F: Fn(&TestCase) -> CaseOutcome + Sync,
{
    let start_time = Instant::now();

    let run_one = |case: &TestCase| {
        let case_start = Instant::now();
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| check(case))) {
            Ok(outcome) => outcome,
            Err(payload) => CaseOutcome::Errored(panic_message(payload)),
        };
        if config.log_cases {
            eprintln!(
                "Case n = {:2}, a = {:>8}: {}",
                case.n,
                case.start,
                if outcome.passed() { "pass" } else { "FAIL" }
            );
        }
        if config.log_elapsed {
            eprintln!("  elapsed: {:5?}us", case_start.elapsed().as_micros());
        }
        (case.clone(), outcome)
    };

    let details = if config.parallel {
        cases.par_iter().map(run_one).collect::<Vec<_>>()
    } else {
        cases.iter().map(run_one).collect::<Vec<_>>()
    };

    if config.log_elapsed {
        eprintln!("Total time: {}ms", start_time.elapsed().as_millis());
    }

    Report::new(details)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panicked".to_owned()
    }
}

/************************
 *     Report           *
 ************************/

/// Tally of a run of `run_cases`, in the order the cases were given.
#[derive(Debug, Clone)]
pub struct Report {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub details: Vec<(TestCase, CaseOutcome)>,
}

impl Report {
    fn new(details: Vec<(TestCase, CaseOutcome)>) -> Report {
        let passed = details.iter().filter(|(_, outcome)| outcome.passed()).count();
        Report {
            total: details.len(),
            passed,
            failed: details.len() - passed,
            details,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// 0 if every case passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (case, outcome) in &self.details {
            let desc = &case.description;
            match outcome {
                CaseOutcome::Passed { actual, predicted } => {
                    writeln!(f, "✓ {}: Actual={}, Predicted={}", desc, actual, predicted)?
                }
                CaseOutcome::NotMagic => writeln!(f, "✗ {}: Generated square is not magic", desc)?,
                CaseOutcome::Mismatch { actual, predicted } => writeln!(
                    f,
                    "✗ {}: Mismatch (Actual={}, Predicted={}, abs error={:e}, rel error={:e})",
                    desc,
                    actual,
                    predicted,
                    outcome.abs_error().unwrap_or(f64::NAN),
                    outcome.rel_error().unwrap_or(f64::NAN),
                )?,
                CaseOutcome::Errored(msg) => writeln!(f, "✗ {}: Error - {}", desc, msg)?,
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Total tests: {}", self.total)?;
        writeln!(f, "Passed: {}", self.passed)?;
        writeln!(f, "Failed: {}", self.failed)?;
        writeln!(f)?;
        if self.all_passed() {
            writeln!(f, "All tests passed! Formula verified.")
        } else {
            writeln!(f, "Some tests failed.")
        }
    }
}

#[test]
fn test_default_cases_pass() {
    let report = run_cases(&default_cases(), &Config::default());
    assert_eq!(report.total, 4);
    assert_eq!(report.passed, 4, "{}", report);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_end_to_end() {
    assert_eq!(
        check_case(&TestCase::new(3, 1.0, "3")),
        CaseOutcome::Passed {
            actual: 15.0,
            predicted: 15.0
        }
    );
    assert_eq!(
        check_case(&TestCase::new(3, 100.0, "3 at 100")),
        CaseOutcome::Passed {
            actual: 312.0,
            predicted: 312.0
        }
    );
}

#[test]
fn test_construction_matches_formula() {
    for n in [3, 5, 7] {
        for a in [0.0, 1.0, 100.0, 500.5] {
            let outcome = check_case(&TestCase::new(n, a, ""));
            assert!(outcome.passed(), "n={} a={}: {:?}", n, a, outcome);
            assert!(outcome.rel_error().unwrap_or(1.0) < MATCH_TOLERANCE);
        }
    }
}

#[test]
fn test_failures_are_isolated() {
    let cases = vec![
        TestCase::new(3, 1.0, "good"),
        TestCase::new(4, 1.0, "even"),
        TestCase::new(5, 1.0, "good"),
        TestCase::new(9, 1.0, "explodes"),
    ];
    let config = Config::default();
    let report = run_cases_with(&cases, &config, |case| {
        if case.description == "explodes" {
            panic!("boom");
        }
        check_case(case)
    });

    assert_eq!(report.total, 4);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 2);
    assert_eq!(report.exit_code(), 1);
    assert_eq!(
        report.details[1].1,
        CaseOutcome::Errored("Siamese method requires odd n, got 4".to_owned())
    );
    assert_eq!(report.details[3].1, CaseOutcome::Errored("boom".to_owned()));

    let text = report.to_string();
    assert!(text.contains("✗ explodes: Error - boom"));
    assert!(text.contains("Failed: 2"));
    assert!(text.ends_with("Some tests failed.\n"));
}

#[test]
fn test_mismatch_is_reported() {
    let square = MagicSquare::siamese(3, 1.0).unwrap();
    // Claim it starts at 2: the square still sums to 15, the formula says 18.
    let outcome = compare(&TestCase::new(3, 2.0, "lying"), &square);
    assert_eq!(
        outcome,
        CaseOutcome::Mismatch {
            actual: 15.0,
            predicted: 18.0
        }
    );
    assert_eq!(outcome.abs_error(), Some(3.0));
    assert_eq!(outcome.rel_error(), Some(3.0 / 18.0));
}

#[test]
fn test_parallel_keeps_order() {
    let cases = (0..20)
        .map(|i| TestCase::new(2 * (i % 6) + 1, i as f64, format!("case {}", i)))
        .collect::<Vec<_>>();
    let config = Config {
        parallel: true,
        ..Config::default()
    };
    let parallel = run_cases(&cases, &config);
    let sequential = run_cases(&cases, &Config::default());
    assert_eq!(parallel.passed, 20);
    assert_eq!(parallel.details, sequential.details);
}

#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn construction_matches_formula(half in 0u32..8, a in -1e4f64..1e4) {
            let n = 2 * half + 1;
            let outcome = check_case(&TestCase::new(n, a, "random"));
            prop_assert!(outcome.passed(), "n={} a={}: {:?}", n, a, outcome);
        }
    }
}
