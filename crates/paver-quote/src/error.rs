//! Quote engine error types.

use thiserror::Error;

/// Errors that can occur while computing a quote.
///
/// All variants are input-validation failures: the caller fixes the project
/// or the catalog and re-invokes. There is no transient failure mode.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// A pattern references a SKU with no catalog metadata.
    #[error("Stone not found in catalog: {0}")]
    StoneNotFound(String),

    /// A border pattern references a stone without conversion factors.
    #[error("Stone cannot be used as a border: {0}")]
    NotABorderStone(String),

    /// A pattern's stones sum to zero intrinsic size while its coverage
    /// target is non-zero, which would divide by zero.
    #[error("Pattern {index} has zero intrinsic size but a coverage target of {target}")]
    DegeneratePattern { index: usize, target: f64 },

    /// Arithmetic overflow in money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
