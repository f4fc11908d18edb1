//! Worked examples of the generalized magic constant, next to the squares behind them.

use hypermagic::{generate_magic_square_odd, verify_square, SquareSet, Walkthrough};

fn main() {
    print!("{}", Walkthrough);
    println!();

    println!("The classical 3x3 square, and the same square starting at 100:");
    println!();
    let classical = generate_magic_square_odd(3, 1.0).unwrap();
    let shifted = generate_magic_square_odd(3, 100.0).unwrap();
    print!("{}", SquareSet(vec![&classical, &shifted]));
    println!();

    for square in [&classical, &shifted] {
        let verdict = verify_square(square);
        println!("magic: {}, constant: {}", verdict.is_magic, verdict.constant);
    }
}
