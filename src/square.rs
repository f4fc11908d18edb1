use crate::error::{Error, Result};
use bitvec::{bitvec, vec::BitVec};
use std::fmt;

/// An `n x n` grid of numbers, stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct MagicSquare {
    n: usize,
    cells: Vec<f64>,
}

impl MagicSquare {
    /// Build an odd-order magic square holding `start, start+1, ..., start + n² - 1` with the
    /// Siamese method: start in the middle of the top row, and keep stepping up-and-right
    /// (wrapping around the edges). When that cell is already taken, step down instead.
    ///
    /// Errors if `n` is even or zero.
    pub fn siamese(n: u32, start: f64) -> Result<MagicSquare> {
        if n == 0 {
            return Err(Error::EmptyOrder);
        }
        if n % 2 == 0 {
            return Err(Error::EvenOrder(n));
        }

        let n = n as usize;
        let mut cells = vec![0.0; n * n];
        // Which cells have been placed. Can't look at the cell values for this, since `start` (or
        // any later value) may be zero.
        let mut filled: BitVec = bitvec![0; n * n];

        let (mut row, mut col) = (0, n / 2);
        let mut current = start;
        for _ in 0..n * n {
            cells[row * n + col] = current;
            filled.set(row * n + col, true);
            current += 1.0;

            let up = (row + n - 1) % n;
            let right = (col + 1) % n;
            if filled[up * n + right] {
                row = (row + 1) % n;
            } else {
                row = up;
                col = right;
            }
        }

        Ok(MagicSquare { n, cells })
    }

    /// Wrap an explicit grid. Errors unless every row is as long as there are rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<MagicSquare> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::EmptyOrder);
        }
        let mut cells = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(Error::NotSquare {
                    rows: n,
                    len: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(MagicSquare { n, cells })
    }

    /// The side length.
    pub fn order(&self) -> usize {
        self.n
    }

    /// The value at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r >= n` or `c >= n`.
    pub fn get(&self, r: usize, c: usize) -> f64 {
        assert!(r < self.n && c < self.n, "index out of bounds");
        self.cells[r * self.n + c]
    }

    /// The cells in row-major order: `(r, c)` is at index `r * n + c`.
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.cells.chunks(self.n)
    }
}

/// Shorthand for `MagicSquare::siamese`.
pub fn generate_magic_square_odd(n: u32, start: f64) -> Result<MagicSquare> {
    MagicSquare::siamese(n, start)
}

impl fmt::Display for MagicSquare {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries = self
            .cells
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>();
        let width = entries.iter().map(|s| s.len()).max().unwrap_or(1);

        for row in entries.chunks(self.n) {
            for (j, entry) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", entry, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[test]
fn test_siamese_3x3() {
    let square = MagicSquare::siamese(3, 1.0).unwrap();
    assert_eq!(square.cells(), &[8., 1., 6., 3., 5., 7., 4., 9., 2.]);

    let square = MagicSquare::siamese(3, 100.0).unwrap();
    let rows = square.rows().map(|r| r.to_vec()).collect::<Vec<_>>();
    assert_eq!(
        rows,
        vec![
            vec![107., 100., 105.],
            vec![102., 104., 106.],
            vec![103., 108., 101.],
        ]
    );
}

#[test]
fn test_siamese_uses_every_value_once() {
    for n in [1, 3, 5, 7, 9, 11] {
        let square = MagicSquare::siamese(n, 0.0).unwrap();
        let mut values = square.cells().iter().map(|x| *x as usize).collect::<Vec<_>>();
        values.sort();
        assert_eq!(values, (0..(n * n) as usize).collect::<Vec<_>>());
    }
}

#[test]
fn test_zero_start_matches_shifted() {
    // Starting at zero must place values exactly like any other start, shifted.
    let zero = MagicSquare::siamese(7, 0.0).unwrap();
    let one = MagicSquare::siamese(7, 1.0).unwrap();
    for (z, o) in zero.cells().iter().zip(one.cells()) {
        assert_eq!(z + 1.0, *o);
    }
}

#[test]
fn test_bad_orders() {
    assert_eq!(MagicSquare::siamese(4, 1.0), Err(Error::EvenOrder(4)));
    assert_eq!(generate_magic_square_odd(0, 1.0), Err(Error::EmptyOrder));
    assert_eq!(
        MagicSquare::from_rows(vec![vec![1.0, 2.0], vec![3.0]]),
        Err(Error::NotSquare { rows: 2, len: 1 })
    );
}

#[test]
fn test_display() {
    let square = MagicSquare::siamese(3, 1.0).unwrap();
    assert_eq!(square.to_string(), "8 1 6\n3 5 7\n4 9 2\n");

    let square = MagicSquare::siamese(3, 9.0).unwrap();
    assert_eq!(square.to_string(), "16  9 14\n11 13 15\n12 17 10\n");
}
