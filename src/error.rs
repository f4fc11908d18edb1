use thiserror::Error;

/// Why a square couldn't be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Siamese method requires odd n, got {0}")]
    EvenOrder(u32),

    #[error("a square must have order at least 1")]
    EmptyOrder,

    #[error("not a square: {rows} rows, but a row of length {len}")]
    NotSquare { rows: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
