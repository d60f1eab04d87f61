//! Qubit Hamiltonians: complex-weighted sums of Pauli strings.
//!
//!   H = Σ_k  c_k · P_k,   c_k ∈ ℂ \ {0}
//!
//! Terms are kept in a `BTreeMap<PauliTerm, Complex64>`.  Every operation
//! leaves the map canonical: one entry per distinct Pauli string and no entry
//! whose coefficient is exactly zero.  Two operators are therefore equal
//! exactly when their maps are equal, whatever order they were built in.
//!
//! # Example
//!
//! ```rust
//! use arvak_pauli::paulis::{x, y, z};
//! use num_complex::Complex64;
//!
//! let i = Complex64::new(0.0, 1.0);
//! assert_eq!(x(0) * y(0), i * z(0));
//! assert_eq!(y(0) * x(0), -i * z(0));
//! assert_eq!(x(3) * x(3), arvak_pauli::QubitHamiltonian::unit());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use ndarray::Array2;
use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::PauliResult;
use crate::interchange::PauliString;
use crate::matrix::MatrixRealizer;
use crate::term::PauliTerm;
use crate::wavefunction::QubitWaveFunction;

fn is_zero(c: Complex64) -> bool {
    c.re == 0.0 && c.im == 0.0
}

/// A complex-weighted sum of Pauli strings.
///
/// The empty sum is the zero operator (also the `Default`); the sum holding
/// only the identity string is a multiple of the identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<PauliString>", try_from = "Vec<PauliString>")]
pub struct QubitHamiltonian {
    terms: BTreeMap<PauliTerm, Complex64>,
}

impl QubitHamiltonian {
    /// The zero operator.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The identity operator.
    pub fn unit() -> Self {
        Self::from_term(PauliTerm::identity(), Complex64::new(1.0, 0.0))
    }

    /// `c · I`.
    pub fn scalar(c: Complex64) -> Self {
        Self::from_term(PauliTerm::identity(), c)
    }

    /// A single weighted string.  A zero coefficient gives the zero operator.
    pub fn from_term(term: PauliTerm, coeff: Complex64) -> Self {
        let mut h = Self::zero();
        h.accumulate(term, coeff);
        h
    }

    /// Sum of weighted strings; repeated strings are merged.
    pub fn from_terms(terms: impl IntoIterator<Item = (PauliTerm, Complex64)>) -> Self {
        let mut h = Self::zero();
        for (term, coeff) in terms {
            h.accumulate(term, coeff);
        }
        h
    }

    /// Add `coeff · term` in place, dropping the entry if it cancels.
    fn accumulate(&mut self, term: PauliTerm, coeff: Complex64) {
        use std::collections::btree_map::Entry;

        match self.terms.entry(term) {
            Entry::Occupied(mut e) => {
                let sum = *e.get() + coeff;
                if is_zero(sum) {
                    e.remove();
                } else {
                    *e.get_mut() = sum;
                }
            }
            Entry::Vacant(e) => {
                if !is_zero(coeff) {
                    e.insert(coeff);
                }
            }
        }
    }

    /// Apply `f` to every coefficient, keeping the map canonical.
    fn map_coefficients(&self, mut f: impl FnMut(&PauliTerm, Complex64) -> Complex64) -> Self {
        Self::from_terms(self.terms.iter().map(|(t, c)| (t.clone(), f(t, *c))))
    }

    // ---------------------------------------------------------------------
    // Inspection
    // ---------------------------------------------------------------------

    /// Iterate over `(string, coefficient)` pairs in canonical order.
    pub fn terms(&self) -> impl Iterator<Item = (&PauliTerm, &Complex64)> {
        self.terms.iter()
    }

    /// Number of distinct strings with nonzero coefficient.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True for the zero operator.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient of `term` (zero if absent).
    pub fn coefficient(&self, term: &PauliTerm) -> Complex64 {
        self.terms.get(term).copied().unwrap_or_default()
    }

    /// Sorted list of qubits acted on non-trivially.
    pub fn qubits(&self) -> Vec<u32> {
        let mut qs: Vec<u32> = self.terms.keys().flat_map(|t| t.qubits()).collect();
        qs.sort_unstable();
        qs.dedup();
        qs
    }

    /// Minimal qubit-space size: highest referenced index + 1 (0 if none).
    pub fn n_qubits(&self) -> u32 {
        self.terms
            .keys()
            .filter_map(PauliTerm::max_qubit)
            .max()
            .map_or(0, |q| q + 1)
    }

    /// True if every string consists of `Z` factors only.
    pub fn is_all_z(&self) -> bool {
        self.terms.keys().all(PauliTerm::is_all_z)
    }

    /// True if every coefficient is real (Pauli strings are Hermitian).
    pub fn is_hermitian(&self) -> bool {
        self.terms.values().all(|c| c.im == 0.0)
    }

    /// True if every coefficient is purely imaginary.
    pub fn is_antihermitian(&self) -> bool {
        self.terms.values().all(|c| c.re == 0.0)
    }

    // ---------------------------------------------------------------------
    // Arithmetic
    // ---------------------------------------------------------------------

    /// `self + other`.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &QubitHamiltonian) -> Self {
        let mut out = self.clone();
        out += other;
        out
    }

    /// `c · self`.
    pub fn scale(&self, c: Complex64) -> Self {
        self.map_coefficients(|_, v| v * c)
    }

    /// Operator product `self · other`.
    ///
    /// Every pair of strings is multiplied with [`PauliTerm::multiply`];
    /// results sharing a string are summed, and cancelled ones removed.
    pub fn multiply(&self, other: &QubitHamiltonian) -> Self {
        let mut acc: FxHashMap<PauliTerm, Complex64> = FxHashMap::default();
        for (ta, ca) in &self.terms {
            for (tb, cb) in &other.terms {
                let (phase, t) = ta.multiply(tb);
                *acc.entry(t).or_default() += phase.apply(ca * cb);
            }
        }
        Self::from_terms(acc)
    }

    /// `self^n`; `pow(0)` is the identity.
    pub fn pow(&self, n: u32) -> Self {
        (0..n).fold(Self::unit(), |acc, _| acc.multiply(self))
    }

    /// `[self, other] = self·other - other·self`.
    pub fn commutator(&self, other: &QubitHamiltonian) -> Self {
        self.multiply(other) - other.multiply(self)
    }

    /// `{self, other} = self·other + other·self`.
    pub fn anticommutator(&self, other: &QubitHamiltonian) -> Self {
        self.multiply(other) + other.multiply(self)
    }

    /// Complex conjugate in the computational basis.
    ///
    /// X and Z are real matrices and Y is imaginary, so each coefficient is
    /// conjugated and picks up `(-1)^{#Y}`.
    pub fn conjugate(&self) -> Self {
        self.map_coefficients(|t, c| {
            let c = c.conj();
            if t.y_count() % 2 == 1 { -c } else { c }
        })
    }

    /// Transpose in the computational basis.
    ///
    /// X and Z are symmetric and Y antisymmetric: each coefficient picks up
    /// `(-1)^{#Y}` and is otherwise unchanged.
    pub fn transpose(&self) -> Self {
        self.map_coefficients(|t, c| if t.y_count() % 2 == 1 { -c } else { c })
    }

    /// Adjoint, `conjugate(transpose(self))`.  Net effect: conjugated coefficients.
    pub fn dagger(&self) -> Self {
        self.transpose().conjugate()
    }

    /// Split into `(hermitian, anti_hermitian)` parts with `self = h + a`.
    pub fn split(&self) -> (Self, Self) {
        let hermitian = self.map_coefficients(|_, c| Complex64::new(c.re, 0.0));
        let anti = self.map_coefficients(|_, c| Complex64::new(0.0, c.im));
        (hermitian, anti)
    }

    /// Drop terms with `|c| <= threshold`.
    pub fn simplify(&self, threshold: f64) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .filter(|(_, c)| c.norm() > threshold)
                .map(|(t, c)| (t.clone(), *c))
                .collect(),
        }
    }

    /// Relabel qubits with `f`.  Fails if `f` sends two qubits of one string
    /// to the same index.
    pub fn map_qubits(&self, f: impl Fn(u32) -> u32) -> PauliResult<Self> {
        let mut out = Self::zero();
        for (t, c) in &self.terms {
            out.accumulate(t.map_qubits(&f)?, *c);
        }
        Ok(out)
    }

    // ---------------------------------------------------------------------
    // Dense realisations
    // ---------------------------------------------------------------------

    /// Dense `2^n × 2^n` matrix over the minimal qubit space [`n_qubits`](Self::n_qubits).
    pub fn to_matrix(&self) -> PauliResult<Array2<Complex64>> {
        MatrixRealizer::new().realize(self)
    }

    /// Dense matrix over an explicit number of qubits.
    ///
    /// Fails with `DimensionMismatch` if a term references a qubit `>= n_qubits`.
    pub fn to_matrix_with(&self, n_qubits: u32) -> PauliResult<Array2<Complex64>> {
        MatrixRealizer::new().with_n_qubits(n_qubits).realize(self)
    }

    /// `self |wfn⟩`, computed term by term without building the matrix.
    pub fn apply(&self, wfn: &QubitWaveFunction) -> PauliResult<QubitWaveFunction> {
        wfn.apply(self)
    }
}

impl From<PauliTerm> for QubitHamiltonian {
    fn from(term: PauliTerm) -> Self {
        Self::from_term(term, Complex64::new(1.0, 0.0))
    }
}

impl FromIterator<(PauliTerm, Complex64)> for QubitHamiltonian {
    fn from_iter<T: IntoIterator<Item = (PauliTerm, Complex64)>>(iter: T) -> Self {
        Self::from_terms(iter)
    }
}

fn fmt_coeff(c: Complex64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if c.im == 0.0 {
        write!(f, "{:+}", c.re)
    } else if c.re == 0.0 {
        write!(f, "{:+}i", c.im)
    } else {
        write!(f, "+({}{:+}i)", c.re, c.im)
    }
}

impl fmt::Display for QubitHamiltonian {
    /// Formats as `+0.5X(0)Y(1)-1Z(2)`; the zero operator prints as `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (t, c) in &self.terms {
            fmt_coeff(*c, f)?;
            write!(f, "{t}")?;
        }
        Ok(())
    }
}

// -------------------------------------------------------------------------
// Operator sugar
// -------------------------------------------------------------------------

impl AddAssign<&QubitHamiltonian> for QubitHamiltonian {
    fn add_assign(&mut self, rhs: &QubitHamiltonian) {
        for (t, c) in &rhs.terms {
            self.accumulate(t.clone(), *c);
        }
    }
}

impl AddAssign for QubitHamiltonian {
    fn add_assign(&mut self, rhs: QubitHamiltonian) {
        for (t, c) in rhs.terms {
            self.accumulate(t, c);
        }
    }
}

impl SubAssign<&QubitHamiltonian> for QubitHamiltonian {
    fn sub_assign(&mut self, rhs: &QubitHamiltonian) {
        for (t, c) in &rhs.terms {
            self.accumulate(t.clone(), -c);
        }
    }
}

impl SubAssign for QubitHamiltonian {
    fn sub_assign(&mut self, rhs: QubitHamiltonian) {
        *self -= &rhs;
    }
}

impl MulAssign<&QubitHamiltonian> for QubitHamiltonian {
    fn mul_assign(&mut self, rhs: &QubitHamiltonian) {
        *self = self.multiply(rhs);
    }
}

impl MulAssign for QubitHamiltonian {
    fn mul_assign(&mut self, rhs: QubitHamiltonian) {
        *self = self.multiply(&rhs);
    }
}

impl MulAssign<Complex64> for QubitHamiltonian {
    fn mul_assign(&mut self, rhs: Complex64) {
        *self = self.scale(rhs);
    }
}

impl MulAssign<f64> for QubitHamiltonian {
    fn mul_assign(&mut self, rhs: f64) {
        *self = self.scale(Complex64::new(rhs, 0.0));
    }
}

impl Neg for &QubitHamiltonian {
    type Output = QubitHamiltonian;

    fn neg(self) -> QubitHamiltonian {
        self.map_coefficients(|_, c| -c)
    }
}

impl Neg for QubitHamiltonian {
    type Output = QubitHamiltonian;

    fn neg(self) -> QubitHamiltonian {
        -&self
    }
}

impl Add<&QubitHamiltonian> for &QubitHamiltonian {
    type Output = QubitHamiltonian;

    fn add(self, rhs: &QubitHamiltonian) -> QubitHamiltonian {
        QubitHamiltonian::add(self, rhs)
    }
}

impl Sub<&QubitHamiltonian> for &QubitHamiltonian {
    type Output = QubitHamiltonian;

    fn sub(self, rhs: &QubitHamiltonian) -> QubitHamiltonian {
        let mut out = self.clone();
        out -= rhs;
        out
    }
}

impl Mul<&QubitHamiltonian> for &QubitHamiltonian {
    type Output = QubitHamiltonian;

    fn mul(self, rhs: &QubitHamiltonian) -> QubitHamiltonian {
        self.multiply(rhs)
    }
}

/// Forwards the owned operand combinations of a binary operator to the
/// `&a op &b` impl.
macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<QubitHamiltonian> for QubitHamiltonian {
            type Output = QubitHamiltonian;

            fn $method(self, rhs: QubitHamiltonian) -> QubitHamiltonian {
                $trait::$method(&self, &rhs)
            }
        }

        impl $trait<&QubitHamiltonian> for QubitHamiltonian {
            type Output = QubitHamiltonian;

            fn $method(self, rhs: &QubitHamiltonian) -> QubitHamiltonian {
                $trait::$method(&self, rhs)
            }
        }

        impl $trait<QubitHamiltonian> for &QubitHamiltonian {
            type Output = QubitHamiltonian;

            fn $method(self, rhs: QubitHamiltonian) -> QubitHamiltonian {
                $trait::$method(self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

/// `scalar * H` and `H * scalar` for scalars convertible to `Complex64`.
macro_rules! scalar_mul {
    ($scalar:ty) => {
        impl Mul<$scalar> for &QubitHamiltonian {
            type Output = QubitHamiltonian;

            fn mul(self, rhs: $scalar) -> QubitHamiltonian {
                self.scale(Complex64::from(rhs))
            }
        }

        impl Mul<$scalar> for QubitHamiltonian {
            type Output = QubitHamiltonian;

            fn mul(self, rhs: $scalar) -> QubitHamiltonian {
                self.scale(Complex64::from(rhs))
            }
        }

        impl Mul<&QubitHamiltonian> for $scalar {
            type Output = QubitHamiltonian;

            fn mul(self, rhs: &QubitHamiltonian) -> QubitHamiltonian {
                rhs.scale(Complex64::from(self))
            }
        }

        impl Mul<QubitHamiltonian> for $scalar {
            type Output = QubitHamiltonian;

            fn mul(self, rhs: QubitHamiltonian) -> QubitHamiltonian {
                rhs.scale(Complex64::from(self))
            }
        }
    };
}

scalar_mul!(Complex64);
scalar_mul!(f64);

impl Sum for QubitHamiltonian {
    fn sum<I: Iterator<Item = QubitHamiltonian>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut acc, h| {
            acc += h;
            acc
        })
    }
}

impl<'a> Sum<&'a QubitHamiltonian> for QubitHamiltonian {
    fn sum<I: Iterator<Item = &'a QubitHamiltonian>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut acc, h| {
            acc += h;
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::PauliOp;

    fn term(s: &str) -> PauliTerm {
        s.parse().unwrap()
    }

    #[test]
    fn cancellation_removes_terms() {
        let a = QubitHamiltonian::from_term(term("X0"), Complex64::new(0.5, 0.0));
        let b = QubitHamiltonian::from_term(term("X0"), Complex64::new(-0.5, 0.0));
        let sum = &a + &b;
        assert!(sum.is_zero());
        assert_eq!(sum.n_terms(), 0);
    }

    #[test]
    fn from_terms_merges_duplicates() {
        let h = QubitHamiltonian::from_terms([
            (term("Z1"), Complex64::new(1.0, 0.0)),
            (term("Z1"), Complex64::new(2.0, 0.0)),
            (term("X0"), Complex64::new(0.0, 0.0)),
        ]);
        assert_eq!(h.n_terms(), 1);
        assert_eq!(h.coefficient(&term("Z1")), Complex64::new(3.0, 0.0));
        assert_eq!(h.coefficient(&term("X0")), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn qubit_count_inference() {
        let h = QubitHamiltonian::from(term("X0 Z4")) + QubitHamiltonian::from(term("Y2"));
        assert_eq!(h.n_qubits(), 5);
        assert_eq!(h.qubits(), vec![0, 2, 4]);
        assert_eq!(QubitHamiltonian::unit().n_qubits(), 0);
    }

    #[test]
    fn split_recombines() {
        let h = QubitHamiltonian::from_term(term("X0 Y1"), Complex64::new(0.25, -1.5))
            + QubitHamiltonian::from_term(term("Z3"), Complex64::new(2.0, 0.0));
        let (herm, anti) = h.split();
        assert!(herm.is_hermitian());
        assert!(anti.is_antihermitian());
        assert_eq!(herm + anti, h);
    }

    #[test]
    fn simplify_drops_small_terms() {
        let h = QubitHamiltonian::from_terms([
            (term("X0"), Complex64::new(1e-9, 0.0)),
            (term("Z0"), Complex64::new(1.0, 0.0)),
        ]);
        let s = h.simplify(1e-6);
        assert_eq!(s.n_terms(), 1);
        assert_eq!(s.coefficient(&term("Z0")), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn pow_and_commutator() {
        let x = QubitHamiltonian::from(PauliTerm::single(0, PauliOp::X));
        let z = QubitHamiltonian::from(PauliTerm::single(0, PauliOp::Z));
        assert_eq!(x.pow(0), QubitHamiltonian::unit());
        assert_eq!(x.pow(2), QubitHamiltonian::unit());
        assert_eq!(x.pow(3), x);
        // [X, Z] = -2iY, {X, Z} = 0
        let y = QubitHamiltonian::from(PauliTerm::single(0, PauliOp::Y));
        assert_eq!(x.commutator(&z), y.scale(Complex64::new(0.0, -2.0)));
        assert!(x.anticommutator(&z).is_zero());
    }

    #[test]
    fn display_format() {
        let h = QubitHamiltonian::from_term(term("X0 Y1"), Complex64::new(0.5, 0.0))
            + QubitHamiltonian::from_term(term("Z2"), Complex64::new(-1.0, 0.0));
        assert_eq!(h.to_string(), "+0.5X(0)Y(1)-1Z(2)");
        assert_eq!(QubitHamiltonian::zero().to_string(), "0");
    }

    #[test]
    fn map_qubits_shifts() {
        let h = QubitHamiltonian::from(term("X0 Z1"));
        assert_eq!(h.map_qubits(|q| q + 3).unwrap(), QubitHamiltonian::from(term("X3 Z4")));
    }
}
