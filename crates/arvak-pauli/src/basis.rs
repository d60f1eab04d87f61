//! Computational basis states.
//!
//! A [`BitString`] names a basis state `|b_0 b_1 ... b_{n-1}⟩` as an integer
//! plus a width.  Qubit 0 is the most significant bit, matching the
//! Kronecker ordering used for dense matrices: `"01"` is the integer 1 and
//! has qubit 1 set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PauliError, PauliResult};

/// Widest basis label representable.
pub const MAX_BITS: u32 = u64::BITS;

/// A computational basis state over a fixed number of qubits.
///
/// Serialised as its `"|0110>"` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BitString {
    value: u64,
    n_bits: u32,
}

/// Number of bits needed to write `value` (at least 1).
pub fn min_bits(value: u64) -> u32 {
    (u64::BITS - value.leading_zeros()).max(1)
}

impl BitString {
    /// `value` over `n_bits` qubits; `None` uses the minimal width.
    pub fn from_int(value: u64, n_bits: Option<u32>) -> PauliResult<Self> {
        let needed = min_bits(value);
        let n_bits = n_bits.unwrap_or(needed);
        if n_bits > MAX_BITS {
            return Err(PauliError::TooManyQubits {
                n_qubits: n_bits,
                max: MAX_BITS,
            });
        }
        if n_bits < needed {
            return Err(PauliError::DimensionMismatch {
                context: "bit string width",
                expected: needed as usize,
                got: n_bits as usize,
            });
        }
        Ok(Self { value, n_bits })
    }

    /// Parse a binary label such as `"0110"` or `"|0110>"`.
    pub fn from_binary(label: &str) -> PauliResult<Self> {
        let digits = label
            .trim()
            .trim_start_matches('|')
            .trim_end_matches(['>', '⟩']);
        if digits.is_empty() {
            return Err(PauliError::InvalidBitString(label.to_string()));
        }
        let n_bits = u32::try_from(digits.chars().count()).unwrap_or(u32::MAX);
        if n_bits > MAX_BITS {
            return Err(PauliError::TooManyQubits {
                n_qubits: n_bits,
                max: MAX_BITS,
            });
        }

        let mut value = 0u64;
        for c in digits.chars() {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                _ => return Err(PauliError::InvalidBitString(label.to_string())),
            };
            value = (value << 1) | bit;
        }
        Ok(Self { value, n_bits })
    }

    /// The integer index of this basis state.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Number of qubits.
    pub fn n_bits(&self) -> u32 {
        self.n_bits
    }

    /// The bit of qubit `q` (qubit 0 is most significant).
    ///
    /// # Panics
    ///
    /// Panics if `q >= n_bits`.
    pub fn bit(&self, q: u32) -> u8 {
        assert!(q < self.n_bits, "qubit {q} out of range for {} bits", self.n_bits);
        ((self.value >> (self.n_bits - 1 - q)) & 1) as u8
    }

    /// All bits, qubit 0 first.
    pub fn bits(&self) -> Vec<u8> {
        (0..self.n_bits).map(|q| self.bit(q)).collect()
    }

    /// Re-express over a (wider or equal) width.
    pub fn with_width(self, n_bits: u32) -> PauliResult<Self> {
        Self::from_int(self.value, Some(n_bits))
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{:0width$b}>", self.value, width = self.n_bits as usize)
    }
}

impl FromStr for BitString {
    type Err = PauliError;

    fn from_str(s: &str) -> PauliResult<Self> {
        Self::from_binary(s)
    }
}

impl From<BitString> for String {
    fn from(b: BitString) -> Self {
        b.to_string()
    }
}

impl TryFrom<String> for BitString {
    type Error = PauliError;

    fn try_from(label: String) -> PauliResult<Self> {
        Self::from_binary(&label)
    }
}

/// A basis-state label for transfer operators: either a bare integer, whose
/// width is decided by context, or a [`BitString`] with a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisLabel {
    /// Integer index; width chosen by the caller.
    Index(u64),
    /// Fixed-width bit string.
    Bits(BitString),
}

impl BasisLabel {
    /// The width this label insists on, if any.
    pub fn declared_bits(&self) -> Option<u32> {
        match self {
            BasisLabel::Index(_) => None,
            BasisLabel::Bits(b) => Some(b.n_bits()),
        }
    }

    /// The minimal width able to hold this label.
    pub fn min_bits(&self) -> u32 {
        match self {
            BasisLabel::Index(v) => min_bits(*v),
            BasisLabel::Bits(b) => b.n_bits(),
        }
    }

    /// Resolve to a bit string of width `n_bits`.
    pub fn to_bitstring(self, n_bits: u32) -> PauliResult<BitString> {
        match self {
            BasisLabel::Index(v) => BitString::from_int(v, Some(n_bits)),
            BasisLabel::Bits(b) if b.n_bits() == n_bits => Ok(b),
            BasisLabel::Bits(b) => Err(PauliError::DimensionMismatch {
                context: "basis label width",
                expected: n_bits as usize,
                got: b.n_bits() as usize,
            }),
        }
    }
}

impl From<u64> for BasisLabel {
    fn from(v: u64) -> Self {
        BasisLabel::Index(v)
    }
}

impl From<BitString> for BasisLabel {
    fn from(b: BitString) -> Self {
        BasisLabel::Bits(b)
    }
}
