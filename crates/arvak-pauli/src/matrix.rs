//! Dense matrix realisation of qubit operators.
//!
//! A Pauli string over `n` qubits is realised as the Kronecker product
//!
//!   M(P) = M(P_0) ⊗ M(P_1) ⊗ ... ⊗ M(P_{n-1})
//!
//! with qubit 0 as the most significant tensor factor, so `Z(0)` on two
//! qubits is `kron(Z, I)`.  A Hamiltonian is the coefficient-weighted sum of
//! its strings.  Cost is Θ(terms · 4^n) time and 16 · 4^n bytes; widths
//! above [`MAX_MATRIX_QUBITS`] are rejected.

use ndarray::linalg::kron;
use ndarray::{Array2, array};
use num_complex::Complex64;
use tracing::debug;

use crate::algebra::PauliOp;
use crate::error::{PauliError, PauliResult};
use crate::hamiltonian::QubitHamiltonian;
use crate::term::PauliTerm;

/// Largest qubit count accepted for dense realisation (a 4 GiB matrix).
pub const MAX_MATRIX_QUBITS: u32 = 14;

/// The 2×2 matrix of a single-qubit operator.
pub fn pauli_matrix(op: PauliOp) -> Array2<Complex64> {
    let m = op.matrix();
    Array2::from_shape_fn((2, 2), |(r, c)| m[r][c])
}

/// Realise one Pauli string on `n_qubits` qubits (no bounds check).
fn term_matrix(term: &PauliTerm, n_qubits: u32) -> Array2<Complex64> {
    (0..n_qubits).fold(array![[Complex64::new(1.0, 0.0)]], |acc, q| {
        kron(&acc, &pauli_matrix(term.get(q)))
    })
}

/// Converts a [`QubitHamiltonian`] into a dense `2^n × 2^n` matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixRealizer {
    /// Target width; if None, inferred from the operator.
    n_qubits: Option<u32>,
}

impl MatrixRealizer {
    /// A realiser that infers the width from the operator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Realise over exactly `n` qubits, padding absent qubits with identity.
    #[must_use]
    pub fn with_n_qubits(mut self, n: u32) -> Self {
        self.n_qubits = Some(n);
        self
    }

    /// Build the dense matrix of `h`.
    pub fn realize(&self, h: &QubitHamiltonian) -> PauliResult<Array2<Complex64>> {
        let required = h.n_qubits();
        let n_qubits = self.n_qubits.unwrap_or(required);
        if n_qubits < required {
            return Err(PauliError::DimensionMismatch {
                context: "matrix realisation",
                expected: required as usize,
                got: n_qubits as usize,
            });
        }
        if n_qubits > MAX_MATRIX_QUBITS {
            return Err(PauliError::TooManyQubits {
                n_qubits,
                max: MAX_MATRIX_QUBITS,
            });
        }

        let dim = 1usize << n_qubits;
        debug!(
            n_terms = h.n_terms(),
            n_qubits, dim, "realising dense operator matrix"
        );

        let mut out = Array2::<Complex64>::zeros((dim, dim));
        for (term, coeff) in h.terms() {
            out.scaled_add(*coeff, &term_matrix(term, n_qubits));
        }
        Ok(out)
    }
}
