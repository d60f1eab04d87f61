//! Canonical Pauli-string keys.
//!
//! A [`PauliTerm`] is a tensor product of single-qubit Pauli operators on
//! named qubits, identity elsewhere.  It is stored as a sorted
//! `Vec<(qubit_index, PauliOp)>` with identity factors omitted, so two terms
//! are equal exactly when they act identically on every qubit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algebra::{self, PauliOp, Phase};
use crate::error::{PauliError, PauliResult};

/// An immutable Pauli string used as the key of a
/// [`QubitHamiltonian`](crate::QubitHamiltonian).
///
/// Serialised as its list of `(qubit, op)` pairs; deserialisation goes
/// through [`PauliTerm::from_ops`].
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<(u32, PauliOp)>", try_from = "Vec<(u32, PauliOp)>")]
pub struct PauliTerm {
    /// Non-identity factors, sorted by qubit index ascending, no duplicates.
    ops: Vec<(u32, PauliOp)>,
}

impl PauliTerm {
    /// The identity string.
    pub fn identity() -> Self {
        Self::default()
    }

    /// A single-qubit string; `PauliOp::I` yields the identity.
    pub fn single(qubit: u32, op: PauliOp) -> Self {
        Self::from_ops([(qubit, op)]).unwrap_or_default()
    }

    /// Construct from `(qubit, op)` pairs.
    ///
    /// Identity factors are dropped and the rest sorted by qubit.  A qubit
    /// listed twice is rejected; that is a product, not a string.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> PauliResult<Self> {
        let mut v: Vec<(u32, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| !op.is_identity())
            .collect();
        v.sort_by_key(|(q, _)| *q);
        if let Some(w) = v.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(PauliError::InvalidOperator(format!(
                "{}({q}){}({q})",
                w[0].1,
                w[1].1,
                q = w[0].0
            )));
        }
        Ok(Self { ops: v })
    }

    /// Construct from `(qubit, letter)` pairs such as `[(0, 'X'), (3, 'Z')]`.
    pub fn from_labels(labels: impl IntoIterator<Item = (u32, char)>) -> PauliResult<Self> {
        let ops = labels
            .into_iter()
            .map(|(q, c)| PauliOp::from_char(c).map(|op| (q, op)))
            .collect::<PauliResult<Vec<_>>>()?;
        Self::from_ops(ops)
    }

    /// The non-identity `(qubit, op)` pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// The operator acting on `qubit` (identity if absent).
    pub fn get(&self, qubit: u32) -> PauliOp {
        self.ops
            .binary_search_by_key(&qubit, |(q, _)| *q)
            .map_or(PauliOp::I, |idx| self.ops[idx].1)
    }

    /// True if there are no non-identity factors.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of non-identity factors.
    pub fn weight(&self) -> usize {
        self.ops.len()
    }

    /// The qubits with a non-identity factor.
    pub fn qubits(&self) -> impl Iterator<Item = u32> + '_ {
        self.ops.iter().map(|(q, _)| *q)
    }

    /// The highest qubit index referenced, or `None` for the identity.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// Number of `Y` factors.
    pub fn y_count(&self) -> usize {
        self.ops.iter().filter(|(_, op)| *op == PauliOp::Y).count()
    }

    /// True if every factor is `Z`.
    pub fn is_all_z(&self) -> bool {
        self.ops.iter().all(|(_, op)| *op == PauliOp::Z)
    }

    /// Product of two strings: returns `(phase, term)` with `self·other = phase·term`.
    ///
    /// Qubits present in only one operand are copied; shared qubits are
    /// combined with the single-qubit table and their phases accumulated.
    pub fn multiply(&self, other: &PauliTerm) -> (Phase, PauliTerm) {
        let mut phase = Phase::One;
        let mut ops = Vec::with_capacity(self.ops.len() + other.ops.len());
        let (mut a, mut b) = (self.ops.iter().peekable(), other.ops.iter().peekable());

        loop {
            match (a.peek(), b.peek()) {
                (Some(&&(qa, pa)), Some(&&(qb, pb))) => {
                    if qa < qb {
                        ops.push((qa, pa));
                        a.next();
                    } else if qb < qa {
                        ops.push((qb, pb));
                        b.next();
                    } else {
                        let (p, op) = algebra::multiply(pa, pb);
                        phase = phase * p;
                        if !op.is_identity() {
                            ops.push((qa, op));
                        }
                        a.next();
                        b.next();
                    }
                }
                (Some(&&entry), None) => {
                    ops.push(entry);
                    a.next();
                }
                (None, Some(&&entry)) => {
                    ops.push(entry);
                    b.next();
                }
                (None, None) => break,
            }
        }

        (phase, PauliTerm { ops })
    }

    /// True when the two strings commute, i.e. they anticommute on an even
    /// number of qubits.
    pub fn commutes_with(&self, other: &PauliTerm) -> bool {
        let anticommuting = self
            .ops
            .iter()
            .filter(|(q, op)| !algebra::commutes(*op, other.get(*q)))
            .count();
        anticommuting % 2 == 0
    }

    /// Relabel qubits with `f`.  Fails if two qubits land on the same index.
    pub fn map_qubits(&self, mut f: impl FnMut(u32) -> u32) -> PauliResult<Self> {
        let mut ops: Vec<(u32, PauliOp)> = self.ops.iter().map(|(q, op)| (f(*q), *op)).collect();
        ops.sort_by_key(|(q, _)| *q);
        if let Some(w) = ops.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(PauliError::InvalidQubitMap(w[0].0));
        }
        Ok(Self { ops })
    }
}

impl From<PauliTerm> for Vec<(u32, PauliOp)> {
    fn from(term: PauliTerm) -> Self {
        term.ops
    }
}

impl TryFrom<Vec<(u32, PauliOp)>> for PauliTerm {
    type Error = PauliError;

    fn try_from(ops: Vec<(u32, PauliOp)>) -> PauliResult<Self> {
        Self::from_ops(ops)
    }
}

impl fmt::Display for PauliTerm {
    /// Formats as `X(0)Y(3)`; the identity prints as `I`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return write!(f, "I");
        }
        for (q, op) in &self.ops {
            write!(f, "{op}({q})")?;
        }
        Ok(())
    }
}

impl FromStr for PauliTerm {
    type Err = PauliError;

    /// Parses whitespace-separated factors such as `"X0 Y1 Z5"`.
    /// The empty string is the identity.
    fn from_str(s: &str) -> PauliResult<Self> {
        let mut ops = Vec::new();
        for token in s.split_whitespace() {
            let mut chars = token.chars();
            let letter = chars
                .next()
                .ok_or_else(|| PauliError::InvalidOperator(token.to_string()))?;
            let op = PauliOp::from_char(letter)?;
            let qubit: u32 = chars
                .as_str()
                .parse()
                .map_err(|_| PauliError::InvalidOperator(token.to_string()))?;
            ops.push((qubit, op));
        }
        Self::from_ops(ops)
    }
}
