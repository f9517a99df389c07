use thiserror::Error;

pub type GlvResult<T> = Result<T, GlvError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GlvError {
    #[error("Invalid argument: {what}")]
    InvalidArgument { what: &'static str },

    #[error("Dimension mismatch: {what} (expected={expected}, actual={actual})")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

/// Check that `actual` equals `expected`, reporting `what` on failure.
pub fn ensure_len(what: &'static str, expected: usize, actual: usize) -> GlvResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(GlvError::DimensionMismatch {
            what,
            expected,
            actual,
        })
    }
}
