//! Error types for the Pauli algebra crate.

use thiserror::Error;

/// Errors produced while building or realising qubit operators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PauliError {
    /// A single-qubit label outside {I, X, Y, Z}.
    #[error("Invalid single-qubit operator '{0}' (expected one of I, X, Y, Z)")]
    InvalidOperator(String),

    /// Two inputs disagree on the size of the qubit space.
    #[error("Dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Where the mismatch was detected.
        context: &'static str,
        /// The expected size (qubits or entries).
        expected: usize,
        /// The size actually supplied.
        got: usize,
    },

    /// A basis-state label that is not a string of 0/1 digits.
    #[error("Invalid bit string '{0}'")]
    InvalidBitString(String),

    /// An amplitude array whose length is not a power of two.
    #[error("Amplitude array of length {0} is not a power of two")]
    InvalidAmplitudes(usize),

    /// Dense realisation requested for more qubits than supported.
    #[error("Dense realisation of {n_qubits} qubits exceeds the limit of {max}")]
    TooManyQubits {
        /// Requested number of qubits.
        n_qubits: u32,
        /// Largest supported dense width.
        max: u32,
    },

    /// A qubit relabelling sends two qubits to the same target.
    #[error("Qubit map sends more than one qubit to {0}")]
    InvalidQubitMap(u32),
}

/// Result type for Pauli algebra operations.
pub type PauliResult<T> = Result<T, PauliError>;
