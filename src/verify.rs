use crate::square::MagicSquare;

const ABS_TOLERANCE: f64 = 1e-8;
const REL_TOLERANCE: f64 = 1e-5;

/// The result of checking a square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub is_magic: bool,
    /// The common sum. Zero if the square isn't magic.
    pub constant: f64,
}

impl Verdict {
    const NOT_MAGIC: Verdict = Verdict {
        is_magic: false,
        constant: 0.0,
    };
}

/// Are `x` and `target` equal, up to floating point noise?
pub(crate) fn is_close(x: f64, target: f64, rel_tolerance: f64) -> bool {
    (x - target).abs() <= ABS_TOLERANCE + rel_tolerance * target.abs()
}

/// Check that every row, every column, and both diagonals of `square` have the same sum. Stops at
/// the first line that doesn't match the first row.
pub fn verify_square(square: &MagicSquare) -> Verdict {
    let n = square.order();
    let mut rows = square.rows();
    let constant = match rows.next() {
        Some(first) => first.iter().sum::<f64>(),
        None => return Verdict::NOT_MAGIC,
    };
    let matches = |sum: f64| is_close(sum, constant, REL_TOLERANCE);

    for row in rows {
        if !matches(row.iter().sum()) {
            return Verdict::NOT_MAGIC;
        }
    }
    for c in 0..n {
        if !matches((0..n).map(|r| square.get(r, c)).sum()) {
            return Verdict::NOT_MAGIC;
        }
    }
    if !matches((0..n).map(|i| square.get(i, i)).sum()) {
        return Verdict::NOT_MAGIC;
    }
    if !matches((0..n).map(|i| square.get(i, n - 1 - i)).sum()) {
        return Verdict::NOT_MAGIC;
    }

    Verdict {
        is_magic: true,
        constant,
    }
}

#[test]
fn test_verify_siamese() {
    let square = MagicSquare::siamese(3, 1.0).unwrap();
    assert_eq!(
        verify_square(&square),
        Verdict {
            is_magic: true,
            constant: 15.0
        }
    );

    let square = MagicSquare::siamese(3, 100.0).unwrap();
    let verdict = verify_square(&square);
    assert!(verdict.is_magic);
    assert_eq!(verdict.constant, 312.0);
}

#[test]
fn test_verify_rejects() {
    // Rows, columns and main diagonal fine, anti-diagonal not.
    let latin = MagicSquare::from_rows(vec![
        vec![1.0, 2.0, 3.0],
        vec![2.0, 3.0, 1.0],
        vec![3.0, 1.0, 2.0],
    ])
    .unwrap();
    assert_eq!(verify_square(&latin), Verdict::NOT_MAGIC);

    // The first row is fine, a later one isn't
    let bad_row = MagicSquare::from_rows(vec![
        vec![8.0, 1.0, 6.0],
        vec![3.0, 5.0, 8.0],
        vec![4.0, 9.0, 2.0],
    ])
    .unwrap();
    assert_eq!(verify_square(&bad_row), Verdict::NOT_MAGIC);

    // A bad column
    let swapped = MagicSquare::from_rows(vec![
        vec![8.0, 1.0, 6.0],
        vec![3.0, 5.0, 7.0],
        vec![9.0, 4.0, 2.0],
    ])
    .unwrap();
    assert!(!verify_square(&swapped).is_magic);

    // The main diagonal is off
    let bad_diagonal = MagicSquare::from_rows(vec![
        vec![1.0, 2.0, 3.0],
        vec![3.0, 1.0, 2.0],
        vec![2.0, 3.0, 1.0],
    ])
    .unwrap();
    assert!(!verify_square(&bad_diagonal).is_magic);

    // Noise within tolerance is fine
    let noisy = MagicSquare::from_rows(vec![vec![1.0, 1.0], vec![1.0, 1.0 + 1e-12]]).unwrap();
    assert!(verify_square(&noisy).is_magic);
}

#[test]
fn test_verify_trivial() {
    let one = MagicSquare::siamese(1, 42.0).unwrap();
    assert_eq!(verify_square(&one).constant, 42.0);
}
