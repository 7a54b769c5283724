use super::utils::*;
use crate::{
    chip::BabyBearChip,
    emulator::EmulationError,
    machine::{CircuitApi, ConstraintBuilder},
    primitives::consts::BABYBEAR_MODULUS,
};
use num_bigint::BigUint;
use p3_baby_bear::BabyBear;
use p3_bn254_fr::Bn254Fr;
use p3_field::{Field, FieldAlgebra};

#[test]
fn test_new_f_reduces_literals() {
    let api = Api::new();
    let chip = chip(&api);
    let p = BigUint::from(BABYBEAR_MODULUS);
    for literal in [
        "0",
        "1",
        "2013265920",
        "2013265921",
        "2013265922",
        "4294967295",
        "123456789012345678901234567890",
    ] {
        let felt = chip.new_f(literal).unwrap();
        let expected = literal.parse::<BigUint>().unwrap() % &p;
        assert_eq!(chip.field().value(&felt.element()), expected);
        assert!(felt.element().is_reduced());
    }
    assert!(is_satisfied(&api));
}

#[test]
fn test_new_f_rejects_malformed_literals() {
    let api = Api::new();
    let chip = chip(&api);
    for literal in ["", "12a", "-1", "0x10"] {
        assert_eq!(
            chip.new_f(literal),
            Err(EmulationError::InvalidLiteral(literal.to_string()))
        );
    }
}

#[test]
fn test_new_succeeds_over_bn254() {
    let api = Api::new();
    let chip = BabyBearChip::new(&api);
    assert_eq!(chip.field().max_overflow(), 190);
}

#[test]
#[should_panic(expected = "failed to create the BabyBear emulation gadget")]
fn test_new_panics_over_small_native_field() {
    let api = ConstraintBuilder::<BabyBear>::new();
    BabyBearChip::new(&api);
}

#[test]
fn test_base_arithmetic_matches_reference() {
    let mut rng = rng();
    let api = Api::new();
    let chip = chip(&api);
    for _ in 0..32 {
        let (x, y) = (random_f(&mut rng), random_nonzero_f(&mut rng));
        let (a, b) = (chip.constant_f(x), chip.constant_f(y));
        assert_eq!(chip.value_f(&chip.add_f(a, b)), x + y);
        assert_eq!(chip.value_f(&chip.sub_f(a, b)), x - y);
        assert_eq!(chip.value_f(&chip.mul_f(a, b)), x * y);
        assert_eq!(chip.value_f(&chip.neg_f(a)), -x);
        assert_eq!(chip.value_f(&chip.inv_f(b)), y.inverse());
        assert_eq!(chip.value_f(&chip.div_f(a, b)), x / y);
    }
    assert!(is_satisfied(&api));
}

#[test]
fn test_field_laws() {
    let mut rng = rng();
    let api = Api::new();
    let chip = chip(&api);
    for _ in 0..16 {
        let a = chip.constant_f(random_f(&mut rng));
        let b = chip.constant_f(random_f(&mut rng));
        let c = chip.constant_f(random_nonzero_f(&mut rng));

        chip.assert_felt_eq(chip.add_f(a, b), chip.add_f(b, a));
        chip.assert_felt_eq(chip.mul_f(a, b), chip.mul_f(b, a));
        chip.assert_felt_eq(
            chip.add_f(chip.add_f(a, b), c),
            chip.add_f(a, chip.add_f(b, c)),
        );
        chip.assert_felt_eq(
            chip.mul_f(chip.mul_f(a, b), c),
            chip.mul_f(a, chip.mul_f(b, c)),
        );

        let zero = chip.add_f(a, chip.neg_f(a));
        assert_eq!(chip.value_f(&zero), BabyBear::ZERO);
        let one = chip.mul_f(c, chip.inv_f(c));
        assert_eq!(chip.value_f(&one), BabyBear::ONE);
    }
    assert!(is_satisfied(&api));
}

#[test]
fn test_unreduced_chains() {
    let api = Api::new();
    let chip = chip(&api);
    let p_minus_one = chip.new_f("2013265920").unwrap();
    let mut acc = p_minus_one;
    let mut expected = -BabyBear::ONE;
    for _ in 0..300 {
        acc = chip.sub_f(chip.add_f(acc, acc), p_minus_one);
        expected = expected + expected + BabyBear::ONE;
    }
    assert_eq!(chip.value_f(&acc), expected);
    let squared = chip.mul_f(acc, chip.neg_f(acc));
    assert_eq!(chip.value_f(&squared), -(expected * expected));
    assert!(is_satisfied(&api));
}

#[test]
fn test_assert_felt_eq() {
    let api = Api::new();
    let chip = chip(&api);
    let a = chip.new_f("7").unwrap();
    // 2013265928 = p + 7
    let b = chip.new_f("2013265928").unwrap();
    let c = chip.add_f(chip.new_f("2013265920").unwrap(), chip.new_f("8").unwrap());
    chip.assert_felt_eq(a, b);
    chip.assert_felt_eq(a, c);
    assert!(is_satisfied(&api));

    chip.assert_felt_eq(a, chip.new_f("8").unwrap());
    assert!(!is_satisfied(&api));
}

#[test]
fn test_assert_felt_ne() {
    let api = Api::new();
    let chip = chip(&api);
    let a = chip.new_f("7").unwrap();
    let b = chip.new_f("8").unwrap();
    chip.assert_felt_ne(a, b);
    assert!(is_satisfied(&api));

    // Same residue through an unreduced representative.
    let c = chip.add_f(chip.new_f("2013265920").unwrap(), b);
    chip.assert_felt_ne(a, c);
    assert!(!is_satisfied(&api));
}

#[test]
fn test_inv_f_of_zero_is_unsatisfiable() {
    let api = Api::new();
    let chip = chip(&api);
    let zero = chip.new_f("0").unwrap();
    chip.inv_f(zero);
    assert!(!is_satisfied(&api));
}

#[test]
fn test_inv_f_rejects_wrong_hint() {
    let api = Api::new();
    let chip = chip(&api);
    let a = chip.new_f("3").unwrap();
    let inv = chip.inv_f(a);
    assert!(is_satisfied(&api));
    api.override_value(inv.var(), Bn254Fr::from_canonical_u32(5));
    assert!(!is_satisfied(&api));
}

#[test]
fn test_select_f() {
    let api = Api::new();
    let chip = chip(&api);
    let a = chip.new_f("11").unwrap();
    let b = chip.new_f("22").unwrap();
    let one = api.constant(Bn254Fr::ONE);
    let zero = api.constant(Bn254Fr::ZERO);
    assert_eq!(chip.value_f(&chip.select_f(one, a, b)), BabyBear::from_canonical_u32(11));
    assert_eq!(chip.value_f(&chip.select_f(zero, a, b)), BabyBear::from_canonical_u32(22));

    let swapped = chip.select_chain_f(one, [a], [b]);
    assert_eq!(
        swapped.iter().map(|f| chip.value_f(f)).collect::<Vec<_>>(),
        vec![BabyBear::from_canonical_u32(22), BabyBear::from_canonical_u32(11)]
    );
    let kept = chip.select_chain_f(zero, [a], [b]);
    assert_eq!(chip.value_f(&kept[0]), BabyBear::from_canonical_u32(11));
    assert!(is_satisfied(&api));
}

#[test]
fn test_exp_reverse_bits() {
    let api = Api::new();
    let chip = chip(&api);
    let x = BabyBear::from_canonical_u32(1234567);
    let input = chip.constant_f(x);
    let one = api.constant(Bn254Fr::ONE);
    let zero = api.constant(Bn254Fr::ZERO);

    // Big-endian 0b1101 = 13.
    let result = chip.exp_reverse_bits(input, &[one, one, zero, one]);
    assert_eq!(chip.value_f(&result), x.exp_u64(13));

    let result = chip.exp_reverse_bits(input, &[]);
    assert_eq!(chip.value_f(&result), BabyBear::ONE);
    assert!(is_satisfied(&api));
}
