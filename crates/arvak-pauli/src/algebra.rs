//! Single-qubit Pauli algebra.
//!
//! The product of two single-qubit Pauli operators is again a Pauli operator
//! up to a phase in {1, i, -1, -i}:
//!
//!   X·Y = iZ    Y·Z = iX    Z·X = iY
//!   Y·X = -iZ   Z·Y = -iX   X·Z = -iY
//!   P·P = I     P·I = I·P = P
//!
//! Phases are tracked as exponents of `i` modulo 4, so multi-qubit products
//! accumulate them without any floating-point error.

use std::fmt;
use std::ops::Mul;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{PauliError, PauliResult};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity. Never stored inside a [`PauliTerm`](crate::PauliTerm).
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// Parse a single letter (case-insensitive).
    pub fn from_char(c: char) -> PauliResult<Self> {
        match c.to_ascii_uppercase() {
            'I' => Ok(PauliOp::I),
            'X' => Ok(PauliOp::X),
            'Y' => Ok(PauliOp::Y),
            'Z' => Ok(PauliOp::Z),
            _ => Err(PauliError::InvalidOperator(c.to_string())),
        }
    }

    /// The upper-case letter for this operator.
    pub fn as_char(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }

    /// True for the identity.
    pub fn is_identity(self) -> bool {
        self == PauliOp::I
    }

    /// The standard 2×2 matrix in row-major order.
    pub fn matrix(self) -> [[Complex64; 2]; 2] {
        let o = Complex64::new(0.0, 0.0);
        let l = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match self {
            PauliOp::I => [[l, o], [o, l]],
            PauliOp::X => [[o, l], [l, o]],
            PauliOp::Y => [[o, -i], [i, o]],
            PauliOp::Z => [[l, o], [o, -l]],
        }
    }
}

impl TryFrom<char> for PauliOp {
    type Error = PauliError;

    fn try_from(c: char) -> PauliResult<Self> {
        Self::from_char(c)
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A phase `i^k`, k ∈ {0, 1, 2, 3}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// +1
    #[default]
    One,
    /// +i
    I,
    /// -1
    MinusOne,
    /// -i
    MinusI,
}

impl Phase {
    /// Build from an exponent of `i`; taken modulo 4.
    pub fn from_exponent(k: u8) -> Self {
        match k % 4 {
            0 => Phase::One,
            1 => Phase::I,
            2 => Phase::MinusOne,
            _ => Phase::MinusI,
        }
    }

    /// The exponent `k` with `self == i^k`.
    pub fn exponent(self) -> u8 {
        match self {
            Phase::One => 0,
            Phase::I => 1,
            Phase::MinusOne => 2,
            Phase::MinusI => 3,
        }
    }

    /// The phase as a complex number.
    pub fn to_complex(self) -> Complex64 {
        self.apply(Complex64::new(1.0, 0.0))
    }

    /// Multiply `c` by this phase. Exact: only swaps and negates components.
    pub fn apply(self, c: Complex64) -> Complex64 {
        match self {
            Phase::One => c,
            Phase::I => Complex64::new(-c.im, c.re),
            Phase::MinusOne => Complex64::new(-c.re, -c.im),
            Phase::MinusI => Complex64::new(c.im, -c.re),
        }
    }
}

impl Mul for Phase {
    type Output = Phase;

    fn mul(self, rhs: Phase) -> Phase {
        Phase::from_exponent(self.exponent() + rhs.exponent())
    }
}

/// Multiply two single-qubit operators: returns `(phase, c)` with `a·b = phase·c`.
pub fn multiply(a: PauliOp, b: PauliOp) -> (Phase, PauliOp) {
    use PauliOp::{I, X, Y, Z};
    match (a, b) {
        (I, p) | (p, I) => (Phase::One, p),
        (X, X) | (Y, Y) | (Z, Z) => (Phase::One, I),
        (X, Y) => (Phase::I, Z),
        (Y, Z) => (Phase::I, X),
        (Z, X) => (Phase::I, Y),
        (Y, X) => (Phase::MinusI, Z),
        (Z, Y) => (Phase::MinusI, X),
        (X, Z) => (Phase::MinusI, Y),
    }
}

/// True when the two single-qubit operators commute.
pub fn commutes(a: PauliOp, b: PauliOp) -> bool {
    a.is_identity() || b.is_identity() || a == b
}
