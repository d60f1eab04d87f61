//! `arvak-pauli`: symbolic algebra over multi-qubit Pauli operators.
//!
//! A [`QubitHamiltonian`] is a complex-weighted sum of Pauli strings
//!
//!   H = Σ_k  c_k · P_k
//!
//! kept in canonical form (one entry per distinct string, no zero
//! coefficients) so algebraically equal operators compare equal regardless
//! of how they were built.  Products are evaluated symbolically with exact
//! phase bookkeeping; dense matrices are produced only on request.
//!
//! # Components
//!
//! - [`algebra`]: single-qubit multiplication table and exact phases
//! - [`term`]: [`PauliTerm`], the canonical Pauli-string key
//! - [`hamiltonian`]: [`QubitHamiltonian`] arithmetic, conjugation, adjoint
//! - [`paulis`]: builders for X/Y/Z/I, ladder operators, projectors,
//!   transfer operators and `|ket⟩⟨bra|`
//! - [`matrix`]: Kronecker-product realisation (qubit 0 most significant)
//! - [`basis`], [`wavefunction`]: basis states and dense amplitude vectors
//! - [`interchange`]: key-value form for external Hamiltonian sources
//!
//! # Quick start
//!
//! ```rust
//! use arvak_pauli::paulis::{x, z};
//! use num_complex::Complex64;
//!
//! // Two-qubit transverse-field Ising model
//! let h = -1.0 * z(0) - 1.0 * z(1) + 0.1 * x(0) * x(1);
//! let m = h.to_matrix().unwrap();
//! assert_eq!(m[[0, 0]], Complex64::new(-2.0, 0.0));
//! assert_eq!(m[[0, 3]], Complex64::new(0.1, 0.0));
//! ```

pub mod algebra;
pub mod basis;
pub mod error;
pub mod hamiltonian;
pub mod interchange;
pub mod matrix;
pub mod paulis;
pub mod term;
pub mod wavefunction;

pub use algebra::{PauliOp, Phase};
pub use basis::{BasisLabel, BitString};
pub use error::{PauliError, PauliResult};
pub use hamiltonian::QubitHamiltonian;
pub use interchange::PauliString;
pub use matrix::{MAX_MATRIX_QUBITS, MatrixRealizer};
pub use paulis::KetBra;
pub use term::PauliTerm;
pub use wavefunction::{MAX_STATE_QUBITS, QubitWaveFunction, StateInput};
