//! Export to and import from the key-value Pauli-string form.

use std::collections::BTreeMap;

use arvak_pauli::paulis::{identity, sp, x, y, z};
use arvak_pauli::{
    BitString, PauliError, PauliOp, PauliString, PauliTerm, QubitHamiltonian, QubitWaveFunction,
};
use num_complex::Complex64;
use proptest::prelude::*;

const OPS: [PauliOp; 4] = [PauliOp::I, PauliOp::X, PauliOp::Y, PauliOp::Z];

fn arb_hamiltonian() -> impl Strategy<Value = QubitHamiltonian> {
    let term = prop::collection::vec(0_usize..4, 4).prop_map(|ops| {
        PauliTerm::from_ops(ops.into_iter().enumerate().map(|(q, k)| (q as u32, OPS[k])))
            .expect("qubits are distinct")
    });
    // quarter-integers print and parse exactly
    let coeff = (-40_i32..40, -40_i32..40)
        .prop_map(|(re, im)| Complex64::new(f64::from(re) / 4.0, f64::from(im) / 4.0));
    prop::collection::vec((term, coeff), 0..8)
        .prop_map(|terms| terms.into_iter().collect::<QubitHamiltonian>())
}

fn sample() -> QubitHamiltonian {
    Complex64::new(0.25, -1.5) * x(0) * z(3) + 2.0 * y(1) - 0.5 * identity() + sp(2)
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[test]
fn export_lists_one_record_per_term() {
    let h = sample();
    let records = h.paulistrings();
    assert_eq!(records.len(), h.n_terms());
    for ps in &records {
        let term = ps.naked().unwrap();
        assert_eq!(h.coefficient(&term), ps.coeff());
    }
}

#[test]
fn record_data_uses_letters() {
    let h = Complex64::new(0.0, 2.0) * x(0) * z(3);
    let records = h.paulistrings();
    assert_eq!(records.len(), 1);
    let expected: BTreeMap<u32, char> = [(0, 'X'), (3, 'Z')].into_iter().collect();
    assert_eq!(records[0].data(), &expected);
    assert_eq!(records[0].coeff(), Complex64::new(0.0, 2.0));
}

#[test]
fn identity_exports_as_empty_key() {
    let h = 3.0 * identity();
    assert_eq!(h.to_openfermion(), vec![(vec![], Complex64::new(3.0, 0.0))]);
}

#[test]
fn import_rejects_unknown_letters() {
    let mut data = BTreeMap::new();
    data.insert(1, 'Q');
    let err = PauliString::new(data, Complex64::new(1.0, 0.0)).unwrap_err();
    assert!(matches!(err, PauliError::InvalidOperator(_)));
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn paulistring_round_trip() {
    let h = sample();
    let back = QubitHamiltonian::from_paulistrings(h.paulistrings()).unwrap();
    assert_eq!(back, h);
}

#[test]
fn openfermion_round_trip() {
    let h = sample();
    let back = QubitHamiltonian::from_openfermion(h.to_openfermion()).unwrap();
    assert_eq!(back, h);
}

#[test]
fn json_round_trip() {
    let h = sample();
    let json = serde_json::to_string(&h).unwrap();
    let back: QubitHamiltonian = serde_json::from_str(&json).unwrap();
    assert_eq!(back, h);
}

#[test]
fn json_rejects_bad_letters() {
    let json = r#"[{"data":{"0":"W"},"coeff":[1.0,0.0]}]"#;
    assert!(serde_json::from_str::<QubitHamiltonian>(json).is_err());
}

// ---------------------------------------------------------------------------
// JSON forms of terms, basis states and wavefunctions
// ---------------------------------------------------------------------------

#[test]
fn json_terms_are_canonicalised() {
    let t: PauliTerm = serde_json::from_str(r#"[[3,"X"],[0,"I"],[1,"Z"]]"#).unwrap();
    assert_eq!(t, "Z1 X3".parse::<PauliTerm>().unwrap());
    assert_eq!(t.get(3), PauliOp::X);
    assert_eq!(t.max_qubit(), Some(3));

    let err = serde_json::from_str::<PauliTerm>(r#"[[0,"X"],[0,"Y"]]"#).unwrap_err();
    assert!(err.to_string().contains("Invalid single-qubit operator"), "{err}");
}

#[test]
fn json_bit_strings_use_ket_labels() {
    let b = BitString::from_int(5, Some(4)).unwrap();
    let json = serde_json::to_string(&b).unwrap();
    assert_eq!(json, r#""|0101>""#);
    assert_eq!(serde_json::from_str::<BitString>(&json).unwrap(), b);
    assert!(serde_json::from_str::<BitString>(r#""|012>""#).is_err());
}

#[test]
fn json_wavefunctions_are_validated() {
    let wfn = (0.5 * x(0) + y(1)).apply(&QubitWaveFunction::from_int(1, 2).unwrap()).unwrap();
    let json = serde_json::to_string(&wfn).unwrap();
    let back: QubitWaveFunction = serde_json::from_str(&json).unwrap();
    assert_eq!(back, wfn);
    assert_eq!(back.n_qubits(), 2);

    // three amplitudes name no qubit count
    let bad = "[[1.0,0.0],[0.0,0.0],[0.0,0.0]]";
    assert!(serde_json::from_str::<QubitWaveFunction>(bad).is_err());
}

proptest! {
    #[test]
    fn random_operators_round_trip(h in arb_hamiltonian()) {
        let back = QubitHamiltonian::from_paulistrings(h.paulistrings()).unwrap();
        prop_assert_eq!(&back, &h);
        let back = QubitHamiltonian::from_openfermion(h.to_openfermion()).unwrap();
        prop_assert_eq!(&back, &h);
        let json = serde_json::to_string(&h).unwrap();
        let back: QubitHamiltonian = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, h);
    }
}
