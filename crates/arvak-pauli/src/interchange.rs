//! Key-value interchange form for third-party Hamiltonian sources.
//!
//! External chemistry packages describe a Pauli term as a mapping from qubit
//! index to a single letter plus a complex coefficient, typically keyed by
//! a tuple such as `((0, 'X'), (3, 'Z'))`.  [`PauliString`] is that record;
//! a [`QubitHamiltonian`] exports to and imports from a list of them without
//! loss, and uses the same form for its serde representation.

use std::collections::BTreeMap;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::algebra::PauliOp;
use crate::error::{PauliError, PauliResult};
use crate::hamiltonian::QubitHamiltonian;
use crate::term::PauliTerm;

/// An externally keyed Pauli term: `coeff · ⊗_q data[q]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliString {
    /// Qubit index to operator letter (`X`, `Y` or `Z`).
    data: BTreeMap<u32, char>,
    coeff: Complex64,
}

impl PauliString {
    /// Validate and build from a qubit→letter map.
    ///
    /// Letters are normalised to upper case; identity entries are dropped.
    pub fn new(data: BTreeMap<u32, char>, coeff: Complex64) -> PauliResult<Self> {
        let mut clean = BTreeMap::new();
        for (q, c) in data {
            let op = PauliOp::from_char(c)?;
            if !op.is_identity() {
                clean.insert(q, op.as_char());
            }
        }
        Ok(Self { data: clean, coeff })
    }

    /// Build from a tuple-style key such as `[(0, 'X'), (3, 'Z')]`.
    ///
    /// A qubit listed twice is rejected.
    pub fn from_openfermion(key: &[(u32, char)], coeff: Complex64) -> PauliResult<Self> {
        let mut data = BTreeMap::new();
        for &(q, c) in key {
            if data.insert(q, c).is_some() {
                return Err(PauliError::InvalidOperator(format!("repeated qubit {q} in key")));
            }
        }
        Self::new(data, coeff)
    }

    /// The tuple-style key, sorted by qubit.
    pub fn key_openfermion(&self) -> Vec<(u32, char)> {
        self.data.iter().map(|(q, c)| (*q, *c)).collect()
    }

    /// Qubit index to letter.
    pub fn data(&self) -> &BTreeMap<u32, char> {
        &self.data
    }

    /// The coefficient.
    pub fn coeff(&self) -> Complex64 {
        self.coeff
    }

    /// The Pauli string without its coefficient.
    pub fn naked(&self) -> PauliResult<PauliTerm> {
        PauliTerm::from_labels(self.data.iter().map(|(q, c)| (*q, *c)))
    }

    fn from_term(term: &PauliTerm, coeff: Complex64) -> Self {
        Self {
            data: term.ops().iter().map(|(q, op)| (*q, op.as_char())).collect(),
            coeff,
        }
    }
}

impl QubitHamiltonian {
    /// Export as interchange records, one per term, in canonical order.
    pub fn paulistrings(&self) -> Vec<PauliString> {
        self.terms()
            .map(|(t, c)| PauliString::from_term(t, *c))
            .collect()
    }

    /// Import interchange records; repeated strings are summed.
    pub fn from_paulistrings(
        strings: impl IntoIterator<Item = PauliString>,
    ) -> PauliResult<Self> {
        strings
            .into_iter()
            .map(|ps| ps.naked().map(|t| (t, ps.coeff)))
            .collect::<PauliResult<Vec<_>>>()
            .map(QubitHamiltonian::from_terms)
    }

    /// Export as `(key, coefficient)` pairs with tuple-style keys.
    pub fn to_openfermion(&self) -> Vec<(Vec<(u32, char)>, Complex64)> {
        self.paulistrings()
            .into_iter()
            .map(|ps| (ps.key_openfermion(), ps.coeff))
            .collect()
    }

    /// Import `(key, coefficient)` pairs with tuple-style keys.
    pub fn from_openfermion<K: AsRef<[(u32, char)]>>(
        terms: impl IntoIterator<Item = (K, Complex64)>,
    ) -> PauliResult<Self> {
        terms
            .into_iter()
            .map(|(key, coeff)| PauliString::from_openfermion(key.as_ref(), coeff))
            .collect::<PauliResult<Vec<_>>>()
            .and_then(Self::from_paulistrings)
    }
}

impl From<QubitHamiltonian> for Vec<PauliString> {
    fn from(h: QubitHamiltonian) -> Self {
        h.paulistrings()
    }
}

impl TryFrom<Vec<PauliString>> for QubitHamiltonian {
    type Error = PauliError;

    fn try_from(strings: Vec<PauliString>) -> PauliResult<Self> {
        Self::from_paulistrings(strings)
    }
}
