//! Dense wavefunctions and the inputs accepted for ket/bra construction.

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::algebra::{PauliOp, Phase};
use crate::basis::{self, BitString};
use crate::error::{PauliError, PauliResult};
use crate::hamiltonian::QubitHamiltonian;

/// Largest qubit count accepted for a dense wavefunction (256 MiB of amplitudes).
pub const MAX_STATE_QUBITS: u32 = 24;

/// A dense amplitude vector over `n_qubits` qubits, indexed by the integer
/// value of the basis state (qubit 0 most significant).
///
/// Serialised as the bare amplitude list; the qubit count is recovered from
/// its length on deserialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Complex64>", try_from = "Vec<Complex64>")]
pub struct QubitWaveFunction {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    n_qubits: u32,
}

impl QubitWaveFunction {
    /// The all-zero vector over `n_qubits` qubits.
    pub fn zeros(n_qubits: u32) -> PauliResult<Self> {
        if n_qubits > MAX_STATE_QUBITS {
            return Err(PauliError::TooManyQubits {
                n_qubits,
                max: MAX_STATE_QUBITS,
            });
        }
        Ok(Self {
            amplitudes: vec![Complex64::new(0.0, 0.0); 1 << n_qubits],
            n_qubits,
        })
    }

    /// Wrap an amplitude vector; its length must be a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> PauliResult<Self> {
        let len = amplitudes.len();
        if !len.is_power_of_two() {
            return Err(PauliError::InvalidAmplitudes(len));
        }
        let n_qubits = len.trailing_zeros();
        if n_qubits > MAX_STATE_QUBITS {
            return Err(PauliError::TooManyQubits {
                n_qubits,
                max: MAX_STATE_QUBITS,
            });
        }
        Ok(Self {
            amplitudes,
            n_qubits,
        })
    }

    /// Wrap an `ndarray` amplitude vector.
    pub fn from_array(array: &Array1<Complex64>) -> PauliResult<Self> {
        Self::from_amplitudes(array.to_vec())
    }

    /// The basis state `|b⟩` over `b.n_bits()` qubits.
    pub fn from_basis_state(b: &BitString) -> PauliResult<Self> {
        let mut wfn = Self::zeros(b.n_bits())?;
        wfn.amplitudes[b.value() as usize] = Complex64::new(1.0, 0.0);
        Ok(wfn)
    }

    /// The basis state with integer index `value` over `n_qubits` qubits.
    pub fn from_int(value: u64, n_qubits: u32) -> PauliResult<Self> {
        Self::from_basis_state(&BitString::from_int(value, Some(n_qubits))?)
    }

    /// Number of qubits.
    pub fn n_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// The amplitudes, indexed by basis-state integer.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude of basis state `b`, zero if `b` lies outside the space.
    pub fn amplitude(&self, b: &BitString) -> Complex64 {
        self.amplitudes
            .get(b.value() as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Copy into an `ndarray` vector.
    pub fn to_array(&self) -> Array1<Complex64> {
        Array1::from(self.amplitudes.clone())
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt()
    }

    /// This state divided by its norm.  The zero vector is returned unchanged.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let norm = self.norm();
        if norm == 0.0 {
            return self.clone();
        }
        Self {
            amplitudes: self.amplitudes.iter().map(|a| a / norm).collect(),
            n_qubits: self.n_qubits,
        }
    }

    /// `⟨self|other⟩`.
    pub fn inner(&self, other: &QubitWaveFunction) -> PauliResult<Complex64> {
        self.check_same_space(other)?;
        Ok(self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// True if both states live on the same space and agree to within `tol`
    /// in every amplitude.
    pub fn approx_eq(&self, other: &QubitWaveFunction, tol: f64) -> bool {
        self.n_qubits == other.n_qubits
            && self
                .amplitudes
                .iter()
                .zip(&other.amplitudes)
                .all(|(a, b)| (a - b).norm() <= tol)
    }

    /// Basis states with `|amplitude| > threshold`, in increasing index order.
    pub fn components(&self, threshold: f64) -> impl Iterator<Item = (BitString, Complex64)> + '_ {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(move |(_, a)| a.norm() > threshold)
            .filter_map(move |(i, a)| {
                BitString::from_int(i as u64, Some(self.n_qubits))
                    .ok()
                    .map(|b| (b, *a))
            })
    }

    /// `H|self⟩`.
    ///
    /// Each Pauli string maps `|i⟩` to `phase(i)·|i ⊕ x_mask⟩`, where X and Y
    /// flip their qubit, Z contributes `-1` on a set bit, and Y contributes
    /// `+i` on a clear bit and `-i` on a set bit.
    pub fn apply(&self, h: &QubitHamiltonian) -> PauliResult<QubitWaveFunction> {
        let required = h.n_qubits();
        if required > self.n_qubits {
            return Err(PauliError::DimensionMismatch {
                context: "operator application",
                expected: required as usize,
                got: self.n_qubits as usize,
            });
        }
        trace!(
            n_terms = h.n_terms(),
            n_qubits = self.n_qubits,
            "applying operator to wavefunction"
        );

        let n = self.n_qubits;
        let mut out = vec![Complex64::new(0.0, 0.0); self.amplitudes.len()];
        for (term, coeff) in h.terms() {
            let masks: Vec<(usize, PauliOp)> = term
                .ops()
                .iter()
                .map(|(q, op)| (1usize << (n - 1 - q), *op))
                .collect();
            let x_mask = masks
                .iter()
                .filter(|(_, op)| matches!(op, PauliOp::X | PauliOp::Y))
                .fold(0usize, |m, (bit, _)| m | bit);

            for (i, amp) in self.amplitudes.iter().enumerate() {
                if amp.re == 0.0 && amp.im == 0.0 {
                    continue;
                }
                let mut phase = Phase::One;
                for (bit, op) in &masks {
                    let set = i & bit != 0;
                    match op {
                        PauliOp::Y if set => phase = phase * Phase::MinusI,
                        PauliOp::Y => phase = phase * Phase::I,
                        PauliOp::Z if set => phase = phase * Phase::MinusOne,
                        _ => {}
                    }
                }
                out[i ^ x_mask] += phase.apply(coeff * amp);
            }
        }

        Ok(Self {
            amplitudes: out,
            n_qubits: n,
        })
    }

    fn check_same_space(&self, other: &QubitWaveFunction) -> PauliResult<()> {
        if self.n_qubits != other.n_qubits {
            return Err(PauliError::DimensionMismatch {
                context: "wavefunction qubit count",
                expected: self.n_qubits as usize,
                got: other.n_qubits as usize,
            });
        }
        Ok(())
    }
}

impl From<QubitWaveFunction> for Vec<Complex64> {
    fn from(wfn: QubitWaveFunction) -> Self {
        wfn.amplitudes
    }
}

impl TryFrom<Vec<Complex64>> for QubitWaveFunction {
    type Error = PauliError;

    fn try_from(amplitudes: Vec<Complex64>) -> PauliResult<Self> {
        Self::from_amplitudes(amplitudes)
    }
}

/// Any of the forms a ket or bra may be given in.
#[derive(Debug, Clone, PartialEq)]
pub enum StateInput {
    /// Basis state by integer index; width taken from context.
    BasisIndex(u64),
    /// Basis state with a fixed width.
    BitString(BitString),
    /// Dense amplitudes.
    Amplitudes(QubitWaveFunction),
}

impl StateInput {
    /// Dense amplitudes from a raw vector (length must be a power of two).
    pub fn amplitudes(amplitudes: Vec<Complex64>) -> PauliResult<Self> {
        QubitWaveFunction::from_amplitudes(amplitudes).map(StateInput::Amplitudes)
    }

    /// The qubit count this input fixes, if any.
    pub fn declared_qubits(&self) -> Option<u32> {
        match self {
            StateInput::BasisIndex(_) => None,
            StateInput::BitString(b) => Some(b.n_bits()),
            StateInput::Amplitudes(w) => Some(w.n_qubits()),
        }
    }

    /// The smallest qubit count able to hold this input.
    pub fn min_qubits(&self) -> u32 {
        match self {
            StateInput::BasisIndex(v) => basis::min_bits(*v),
            other => other.declared_qubits().unwrap_or(1),
        }
    }

    /// Convert to a dense wavefunction over `n_qubits` qubits.
    pub fn to_wavefunction(&self, n_qubits: u32) -> PauliResult<QubitWaveFunction> {
        if let Some(declared) = self.declared_qubits() {
            if declared != n_qubits {
                return Err(PauliError::DimensionMismatch {
                    context: "state qubit count",
                    expected: n_qubits as usize,
                    got: declared as usize,
                });
            }
        }
        match self {
            StateInput::BasisIndex(v) => QubitWaveFunction::from_int(*v, n_qubits),
            StateInput::BitString(b) => QubitWaveFunction::from_basis_state(b),
            StateInput::Amplitudes(w) => Ok(w.clone()),
        }
    }
}

impl From<u64> for StateInput {
    fn from(v: u64) -> Self {
        StateInput::BasisIndex(v)
    }
}

impl From<BitString> for StateInput {
    fn from(b: BitString) -> Self {
        StateInput::BitString(b)
    }
}

impl From<QubitWaveFunction> for StateInput {
    fn from(w: QubitWaveFunction) -> Self {
        StateInput::Amplitudes(w)
    }
}

impl From<&QubitWaveFunction> for StateInput {
    fn from(w: &QubitWaveFunction) -> Self {
        StateInput::Amplitudes(w.clone())
    }
}
