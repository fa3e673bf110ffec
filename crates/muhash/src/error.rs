use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MuHashError {
    #[error("invalid {kind} length: got {actual}, expected {expected}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("overflow in the MuHash field")]
    Overflow,

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, MuHashError>;
