//! How much does each row of a magic square add up to? For the classical square holding `1..=n²`,
//! it's `n(n²+1)/2`. More generally, for a magic hypercube of order `n` and dimension `d` whose
//! entries are `a, a+1, ..., a + n^d - 1`, every line adds up to
//!
//! ```text
//! S(n, d, a) = n·a + n(n^d - 1)/2
//! ```
//!
//! This crate evaluates that formula, and checks it against real squares built by the Siamese
//! method.
//!
//! ## Evaluating the formula
//!
//! ```
//! use hypermagic::{classical_magic_constant, magic_constant};
//!
//! assert_eq!(magic_constant(3, 2, 1.0), 15.0);
//! assert_eq!(magic_constant(3, 2, 100.0), 312.0);
//! assert_eq!(magic_constant(5, 3, 500.5), 2812.5);
//! assert_eq!(magic_constant(3, 2, 1.0), classical_magic_constant(3));
//! ```
//!
//! ## Building a square
//!
//! Odd-order squares can be built with the Siamese method. Even orders are refused:
//!
//! ```
//! use hypermagic::{generate_magic_square_odd, verify_square, Error};
//!
//! let square = generate_magic_square_odd(3, 100.0).unwrap();
//! print!("{}", square);
//! // 107 100 105
//! // 102 104 106
//! // 103 108 101
//!
//! let verdict = verify_square(&square);
//! assert!(verdict.is_magic);
//! assert_eq!(verdict.constant, 312.0);
//!
//! assert_eq!(generate_magic_square_odd(4, 1.0), Err(Error::EvenOrder(4)));
//! ```
//!
//! ## Checking the formula
//!
//! `run_cases` builds a square for each case, verifies it, and compares it with the formula. A
//! failing case doesn't stop the rest:
//!
//! ```
//! use hypermagic::{default_cases, run_cases, Config, TestCase};
//!
//! let mut cases = default_cases();
//! cases.push(TestCase::new(4, 1.0, "even, can't be built"));
//!
//! let report = run_cases(&cases, &Config::default());
//! assert_eq!(report.passed, 4);
//! assert_eq!(report.failed, 1);
//! assert_eq!(report.exit_code(), 1);
//! print!("{}", report);
//! ```

mod check;
mod display;
mod error;
mod formula;
mod square;
mod verify;

pub use check::{
    check_case, default_cases, run_cases, CaseOutcome, Report, TestCase, MATCH_TOLERANCE,
};
pub use display::{usage_examples, SquareSet, UsageExample, Walkthrough};
pub use error::{Error, Result};
pub use formula::{classical_magic_constant, dimension_step, magic_constant};
pub use square::{generate_magic_square_odd, MagicSquare};
pub use verify::{verify_square, Verdict};

// When running `main`, this is loaded from command line args.
// See `Config` in `main.rs`.
/// Configuration options for `run_cases`.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Log each case's result as it finishes
    pub log_cases: bool,
    /// Log each square after building it
    pub log_squares: bool,
    /// Log how long each case took
    pub log_elapsed: bool,
    /// Run the cases on the rayon thread pool
    pub parallel: bool,
}
