//! Command line front end: evaluate the formula, build and check squares.

use argh::FromArgs;
use hypermagic::{
    default_cases, dimension_step, magic_constant, run_cases, verify_square, MagicSquare,
    SquareSet, Walkthrough,
};
use std::process;

/************************
 *     Main             *
 ************************/

/// Generalized magic constants: S(n,d,a) = n·a + n(n^d - 1)/2
#[derive(Debug, Clone, FromArgs)]
struct Config {
    #[argh(subcommand)]
    command: Command,

    /// don't log anything besides the results
    #[argh(switch, short = 'q', long = "quiet")]
    quiet: bool,

    /// log each case's result as it finishes
    #[argh(switch, long = "log-cases")]
    log_cases: bool,

    /// log each square after building it
    #[argh(switch, long = "log-squares")]
    log_squares: bool,

    /// log how long each case took
    #[argh(switch, long = "log-elapsed")]
    log_elapsed: bool,
}

#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand)]
enum Command {
    Formula(FormulaCmd),
    Square(SquareCmd),
    Verify(VerifyCmd),
    Usage(UsageCmd),
}

/// evaluate S(n,d,a)
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand, name = "formula")]
struct FormulaCmd {
    /// order of the hypercube
    #[argh(positional)]
    n: u32,
    /// dimension
    #[argh(positional)]
    d: u32,
    /// starting value
    #[argh(positional)]
    a: f64,
}

/// build an odd-order square with the Siamese method, and verify it
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand, name = "square")]
struct SquareCmd {
    /// order of the square (must be odd)
    #[argh(positional)]
    n: u32,
    /// starting value (default 1)
    #[argh(positional)]
    a: Option<f64>,
}

/// check the formula against built squares
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand, name = "verify")]
struct VerifyCmd {
    /// run the cases in parallel
    #[argh(switch, long = "parallel")]
    parallel: bool,
}

/// print worked examples of the formula
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand, name = "usage")]
struct UsageCmd {}

impl Config {
    fn lib_config(&self, parallel: bool) -> hypermagic::Config {
        let mut config = hypermagic::Config {
            parallel,
            ..hypermagic::Config::default()
        };
        if !self.quiet {
            config.log_cases = self.log_cases;
            config.log_squares = self.log_squares;
            config.log_elapsed = self.log_elapsed;
        }
        config
    }
}

fn show_square(n: u32, a: f64) -> i32 {
    let square = match MagicSquare::siamese(n, a) {
        Ok(square) => square,
        Err(err) => {
            eprintln!("{}", err);
            return 2;
        }
    };
    print!("{}", SquareSet(vec![&square]));

    let verdict = verify_square(&square);
    let predicted = magic_constant(n, 2, a);
    if verdict.is_magic {
        println!(
            "Magic, constant = {} (formula: {})",
            verdict.constant, predicted
        );
        0
    } else {
        println!("Not magic (formula: {})", predicted);
        1
    }
}

fn main() {
    let config = argh::from_env::<Config>();

    let code = match &config.command {
        Command::Formula(cmd) => {
            let result = magic_constant(cmd.n, cmd.d, cmd.a);
            println!("S({},{},{}) = {}", cmd.n, cmd.d, cmd.a, result);
            if !config.quiet {
                eprintln!("  one dimension up adds {}", dimension_step(cmd.n, cmd.d));
            }
            0
        }
        Command::Square(cmd) => show_square(cmd.n, cmd.a.unwrap_or(1.0)),
        Command::Verify(cmd) => {
            println!("Generalized magic constant verification");
            println!("==================================================");
            let report = run_cases(&default_cases(), &config.lib_config(cmd.parallel));
            print!("{}", report);
            report.exit_code()
        }
        Command::Usage(_) => {
            print!("{}", Walkthrough);
            0
        }
    };

    process::exit(code);
}
