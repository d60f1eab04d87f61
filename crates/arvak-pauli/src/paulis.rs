//! Operator builders.
//!
//! Factory functions for the common single-qubit operators and for
//! rank-one operators `|ket⟩⟨bra|` expressed as Pauli sums.
//!
//! | builder | operator                  | matrix            |
//! |---------|---------------------------|-------------------|
//! | `sp(q)` | ½(X + iY)                 | \|0⟩⟨1\|          |
//! | `sm(q)` | ½(X − iY)                 | \|1⟩⟨0\|          |
//! | `qp(q)` | ½(I + Z)                  | \|0⟩⟨0\|          |
//! | `qm(q)` | ½(I − Z)                  | \|1⟩⟨1\|          |

use num_complex::Complex64;
use tracing::debug;

use crate::algebra::PauliOp;
use crate::basis::{BasisLabel, BitString};
use crate::error::{PauliError, PauliResult};
use crate::hamiltonian::QubitHamiltonian;
use crate::term::PauliTerm;
use crate::wavefunction::StateInput;

const HALF: f64 = 0.5;
const I_UNIT: Complex64 = Complex64::new(0.0, 1.0);

fn single(qubit: u32, op: PauliOp) -> QubitHamiltonian {
    QubitHamiltonian::from(PauliTerm::single(qubit, op))
}

/// Pauli-X on `qubit`.
pub fn x(qubit: u32) -> QubitHamiltonian {
    single(qubit, PauliOp::X)
}

/// Pauli-Y on `qubit`.
pub fn y(qubit: u32) -> QubitHamiltonian {
    single(qubit, PauliOp::Y)
}

/// Pauli-Z on `qubit`.
pub fn z(qubit: u32) -> QubitHamiltonian {
    single(qubit, PauliOp::Z)
}

/// Identity.  The qubit only labels the call site; the result is the unit operator.
pub fn i(_qubit: u32) -> QubitHamiltonian {
    QubitHamiltonian::unit()
}

/// The unit operator.
pub fn identity() -> QubitHamiltonian {
    QubitHamiltonian::unit()
}

/// The zero operator.
pub fn zero() -> QubitHamiltonian {
    QubitHamiltonian::zero()
}

/// Product of single-qubit operators given as `(qubit, letter)` pairs,
/// e.g. `pauli([(0, 'X'), (2, 'Z')])`.  Repeated qubits multiply.
pub fn pauli(factors: impl IntoIterator<Item = (u32, char)>) -> PauliResult<QubitHamiltonian> {
    factors
        .into_iter()
        .try_fold(QubitHamiltonian::unit(), |acc, (q, c)| {
            Ok(acc * single(q, PauliOp::from_char(c)?))
        })
}

/// Raising operator `½(X + iY) = |0⟩⟨1|`.
pub fn sp(qubit: u32) -> QubitHamiltonian {
    HALF * (x(qubit) + I_UNIT * y(qubit))
}

/// Lowering operator `½(X − iY) = |1⟩⟨0|`.
pub fn sm(qubit: u32) -> QubitHamiltonian {
    HALF * (x(qubit) - I_UNIT * y(qubit))
}

/// Projector onto `|0⟩`: `½(I + Z)`.
pub fn qp(qubit: u32) -> QubitHamiltonian {
    HALF * (i(qubit) + z(qubit))
}

/// Projector onto `|1⟩`: `½(I − Z)`.
pub fn qm(qubit: u32) -> QubitHamiltonian {
    HALF * (i(qubit) - z(qubit))
}

/// Pauli decomposition of the basis transfer operator `|ket⟩⟨bra|`.
///
/// The result is the product over bit positions `p` of
///
/// | ket_p | bra_p | factor on `qubits[p]` |
/// |-------|-------|-----------------------|
/// | 0     | 0     | `qp`                  |
/// | 0     | 1     | `sp`                  |
/// | 1     | 0     | `sm`                  |
/// | 1     | 1     | `qm`                  |
///
/// Without `qubits`, bit position `p` acts on qubit `p` and integer labels
/// use the smallest width holding both.  With `qubits`, integer labels are
/// widened to `qubits.len()` bits and a bit-string label must have exactly
/// `qubits.len()` bits.
pub fn decompose_transfer_operator(
    ket: impl Into<BasisLabel>,
    bra: impl Into<BasisLabel>,
    qubits: Option<&[u32]>,
) -> PauliResult<QubitHamiltonian> {
    let (ket, bra) = (ket.into(), bra.into());

    let width = match (ket.declared_bits(), bra.declared_bits(), qubits) {
        (Some(k), _, _) => k,
        (None, Some(b), _) => b,
        (None, None, Some(qs)) => qs.len() as u32,
        (None, None, None) => ket.min_bits().max(bra.min_bits()),
    };
    let ket = ket.to_bitstring(width)?;
    let bra = bra.to_bitstring(width)?;

    if let Some(qs) = qubits {
        if qs.len() != width as usize {
            return Err(PauliError::DimensionMismatch {
                context: "transfer operator qubit list",
                expected: width as usize,
                got: qs.len(),
            });
        }
    }

    let mut result = QubitHamiltonian::unit();
    for p in 0..width {
        let q = qubits.map_or(p, |qs| qs[p as usize]);
        result *= match (ket.bit(p), bra.bit(p)) {
            (0, 0) => qp(q),
            (0, _) => sp(q),
            (_, 0) => sm(q),
            _ => qm(q),
        };
    }
    Ok(result)
}

/// Builder for the rank-one operator `|ket⟩⟨bra|` as a Pauli sum.
///
/// The operator is assembled as `Σ_{k,b} conj(bra_b)·ket_k · T(k, b)` over
/// basis components of the two states, where `T` is
/// [`decompose_transfer_operator`].  The result is exact unless a cut-off
/// is set with [`KetBra::with_threshold`].
///
/// ```rust
/// use arvak_pauli::paulis::{KetBra, sp};
///
/// let op = KetBra::new(0u64, 1u64).build().unwrap();
/// assert_eq!(op, sp(0));
/// ```
#[derive(Debug, Clone)]
pub struct KetBra {
    ket: StateInput,
    bra: StateInput,
    /// Symmetrise as `½(H + H†)`.
    hermitian: bool,
    /// Basis pairs with `|conj(bra_b)·ket_k| <= threshold` are skipped.
    /// Zero keeps every nonzero pair.
    threshold: f64,
    /// Qubit count; if None, taken from the inputs.
    n_qubits: Option<u32>,
}

impl KetBra {
    /// Construct a builder for `|ket⟩⟨bra|` with default options.
    pub fn new(ket: impl Into<StateInput>, bra: impl Into<StateInput>) -> Self {
        Self {
            ket: ket.into(),
            bra: bra.into(),
            hermitian: false,
            threshold: 0.0,
            n_qubits: None,
        }
    }

    /// Replace the result by its Hermitian part `½(H + H†)`.
    #[must_use]
    pub fn with_hermitian(mut self, hermitian: bool) -> Self {
        self.hermitian = hermitian;
        self
    }

    /// Skip basis pairs whose amplitude product is at most `threshold`.
    ///
    /// The cut-off applies to `conj(bra_b)·ket_k` only; the Pauli
    /// coefficients of the result are never truncated.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Fix the qubit count instead of inferring it from the inputs.
    #[must_use]
    pub fn with_n_qubits(mut self, n: u32) -> Self {
        self.n_qubits = Some(n);
        self
    }

    fn effective_n_qubits(&self) -> PauliResult<u32> {
        if let (Some(k), Some(b)) = (self.ket.declared_qubits(), self.bra.declared_qubits()) {
            if k != b {
                return Err(PauliError::DimensionMismatch {
                    context: "ket/bra qubit count",
                    expected: k as usize,
                    got: b as usize,
                });
            }
        }
        Ok(self
            .n_qubits
            .or(self.ket.declared_qubits())
            .or(self.bra.declared_qubits())
            .unwrap_or_else(|| self.ket.min_qubits().max(self.bra.min_qubits())))
    }

    /// Assemble the operator.
    pub fn build(&self) -> PauliResult<QubitHamiltonian> {
        let n_qubits = self.effective_n_qubits()?;
        let ket = self.ket.to_wavefunction(n_qubits)?;
        let bra = self.bra.to_wavefunction(n_qubits)?;

        let ket_components: Vec<(BitString, Complex64)> = ket.components(0.0).collect();
        let bra_components: Vec<(BitString, Complex64)> = bra.components(0.0).collect();
        debug!(
            n_qubits,
            ket_components = ket_components.len(),
            bra_components = bra_components.len(),
            hermitian = self.hermitian,
            "assembling ket-bra operator"
        );

        let mut h = QubitHamiltonian::zero();
        for (b_bits, b_amp) in &bra_components {
            for (k_bits, k_amp) in &ket_components {
                let c = b_amp.conj() * k_amp;
                if c.norm() <= self.threshold {
                    continue;
                }
                h += c * decompose_transfer_operator(*k_bits, *b_bits, None)?;
            }
        }

        if self.hermitian {
            h = HALF * (&h + h.dagger());
        }
        Ok(h)
    }
}

/// Exact `|ket⟩⟨bra|`.
pub fn ket_bra(
    ket: impl Into<StateInput>,
    bra: impl Into<StateInput>,
) -> PauliResult<QubitHamiltonian> {
    KetBra::new(ket, bra).build()
}

/// Projector `|ψ⟩⟨ψ|`, symmetrised so that `dagger()` returns it exactly.
///
/// No amplitude pair is dropped, so the result is idempotent as a matrix
/// (up to rounding) when `wfn` is normalised.
pub fn projector(wfn: impl Into<StateInput>) -> PauliResult<QubitHamiltonian> {
    let wfn = wfn.into();
    KetBra::new(wfn.clone(), wfn)
        .with_hermitian(true)
        .with_threshold(0.0)
        .build()
}
