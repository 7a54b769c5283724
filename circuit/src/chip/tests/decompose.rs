use super::utils::*;
use crate::{
    chip::Felt,
    machine::{utils::fields_to_bn254, CircuitApi},
    primitives::consts::NUM_LIMBS_PER_NATIVE,
};
use core::array;
use p3_baby_bear::BabyBear;
use p3_bn254_fr::Bn254Fr;
use p3_field::{Field, FieldAlgebra, PrimeField32};

fn raw_limbs(api: &Api, limbs: &[Felt<Bn254Fr>]) -> Vec<Bn254Fr> {
    limbs.iter().map(|limb| api.value(limb.var())).collect()
}

#[test]
fn test_split_one() {
    let api = Api::new();
    let chip = chip(&api);
    let value = api.witness(Bn254Fr::ONE);
    let limbs = chip.split_into_babybear(value);
    assert_eq!(chip.value_f(&limbs[0]), BabyBear::ONE);
    for limb in &limbs[1..] {
        assert_eq!(chip.value_f(limb), BabyBear::ZERO);
    }
    assert!(is_satisfied(&api));
}

#[test]
fn test_split_two_pow_32() {
    let api = Api::new();
    let chip = chip(&api);
    let value = api.witness(Bn254Fr::from_canonical_u64(1 << 32));
    let limbs = chip.split_into_babybear(value);
    assert_eq!(chip.value_f(&limbs[0]), BabyBear::ZERO);
    assert_eq!(chip.value_f(&limbs[1]), BabyBear::ONE);
    for limb in &limbs[2..] {
        assert_eq!(chip.value_f(limb), BabyBear::ZERO);
    }
    assert!(is_satisfied(&api));
}

#[test]
fn test_split_reassembles() {
    let mut rng = rng();
    let api = Api::new();
    let chip = chip(&api);
    let shift = Bn254Fr::from_canonical_u64(1 << 32);
    let values = [
        Bn254Fr::NEG_ONE,
        Bn254Fr::from_canonical_u64(0xffff_ffff_ffff_ffff),
        Bn254Fr::from_canonical_u32(random_f(&mut rng).as_canonical_u32())
            * Bn254Fr::TWO.exp_u64(200),
    ];
    for value in values {
        let var = api.witness(value);
        let limbs = chip.split_into_babybear(var);
        let reassembled = raw_limbs(&api, &limbs)
            .into_iter()
            .rev()
            .fold(Bn254Fr::ZERO, |acc, limb| acc * shift + limb);
        assert_eq!(reassembled, value);
    }
    assert!(is_satisfied(&api));
}

#[test]
fn test_split_limbs_above_modulus_read_modulo_p() {
    let api = Api::new();
    let chip = chip(&api);
    let value = api.witness(Bn254Fr::from_canonical_u32(u32::MAX));
    let limbs = chip.split_32(value, 2);
    assert_eq!(limbs.len(), 2);
    assert_eq!(
        chip.value_f(&limbs[0]),
        BabyBear::from_canonical_u32(u32::MAX - 2 * 2013265921)
    );
    // Reducing the limb is still consistent.
    chip.assert_felt_eq(limbs[0], chip.new_f("4294967295").unwrap());
    assert!(is_satisfied(&api));
}

#[test]
fn test_split_past_native_width_reads_zero() {
    let api = Api::new();
    let chip = chip(&api);
    let value = api.witness(Bn254Fr::NEG_ONE);
    let limbs = chip.split_32(value, 10);
    assert_eq!(chip.value_f(&limbs[8]), BabyBear::ZERO);
    assert_eq!(chip.value_f(&limbs[9]), BabyBear::ZERO);
    assert!(is_satisfied(&api));
}

#[test]
fn test_to_bits_is_little_endian() {
    let api = Api::new();
    let chip = chip(&api);
    // p + 5 reduces to 0b101.
    let a = chip.add_f(chip.new_f("2013265920").unwrap(), chip.new_f("6").unwrap());
    let bits = chip.to_bits(a);
    assert_eq!(bits.len(), 32);
    let values = bits.iter().map(|bit| api.value(*bit)).collect::<Vec<_>>();
    assert_eq!(&values[..4], &[Bn254Fr::ONE, Bn254Fr::ZERO, Bn254Fr::ONE, Bn254Fr::ZERO]);
    assert!(values[4..].iter().all(|bit| *bit == Bn254Fr::ZERO));
    assert!(is_satisfied(&api));
}

#[test]
fn test_num2bits_and_bits2num() {
    let api = Api::new();
    let chip = chip(&api);
    let a = chip.new_f("200").unwrap();
    let bits = chip.num2bits_f(a, 8);
    let b = chip.bits2num_f(&bits);
    chip.assert_felt_eq(a, b);
    assert_eq!(chip.value_f(&b), BabyBear::from_canonical_u32(200));
    assert!(is_satisfied(&api));

    chip.range_check_f(chip.new_f("256").unwrap(), 8);
    assert!(!is_satisfied(&api));
}

#[test]
fn test_bits2num_full_native_width() {
    let api = Api::new();
    let chip = chip(&api);
    let value = api.witness(Bn254Fr::NEG_ONE);
    let bits = api.to_binary(value, 254);
    let felt = chip.bits2num_f(&bits);
    assert!(felt.element().overflow <= 8);
    assert!(felt.element().overflow <= chip.field().max_overflow());

    let expected = (Bn254Fr::order() - 1u32) % 2013265921u32;
    let expected = BabyBear::from_canonical_u64(expected.try_into().unwrap());
    assert_eq!(chip.value_f(&felt), expected);

    let reduced = chip.field().reduce(felt.element());
    assert_eq!(
        api.value(reduced.var),
        Bn254Fr::from_canonical_u32(expected.as_canonical_u32())
    );
    assert!(is_satisfied(&api));

    // Any other remainder below p breaks the recomposition.
    let forged = (expected.as_canonical_u32() + 1_000_000) % 2013265921;
    api.override_value(reduced.var, Bn254Fr::from_canonical_u32(forged));
    assert!(!is_satisfied(&api));
}

#[test]
fn test_wide_limbs_stay_within_max_overflow() {
    let api = Api::new();
    let chip = chip(&api);
    let value = api.witness(Bn254Fr::NEG_ONE);
    let wide = chip.field().new_element(value, 254);
    assert!(wide.overflow <= chip.field().max_overflow());

    let narrow = chip.field().new_element(value, 200);
    assert_eq!(narrow.overflow, 170);
    assert_eq!(narrow.var, value);

    let expected = (Bn254Fr::order() - 1u32) % 2013265921u32;
    let wide = chip.field().reduce(wide);
    assert_eq!(chip.field().value(&wide), expected);
    assert!(is_satisfied(&api));
}

#[test]
fn test_reduce_32() {
    let api = Api::new();
    let chip = chip(&api);
    let felts = [chip.new_f("1").unwrap(), chip.new_f("2").unwrap()];
    let packed = chip.reduce_32(&felts);
    assert_eq!(
        api.value(packed),
        Bn254Fr::from_canonical_u64(1 + (2 << 32))
    );
    assert!(is_satisfied(&api));
}

#[test]
fn test_felts_to_bn254_var() {
    let mut rng = rng();
    let api = Api::new();
    let chip = chip(&api);
    let words: [BabyBear; NUM_LIMBS_PER_NATIVE] = array::from_fn(|_| random_f(&mut rng));
    let felts = words.map(|w| chip.constant_f(w));
    let packed = chip.felts_to_bn254_var(&felts);
    assert_eq!(api.value(packed), fields_to_bn254(&words));
    assert!(is_satisfied(&api));
}

#[test]
fn test_prints_add_no_constraints() {
    let api = Api::new();
    let chip = chip(&api);
    let a = chip.add_f(chip.new_f("2013265920").unwrap(), chip.new_f("3").unwrap());
    let e = chip.new_e(["1", "2", "3", "4"]).unwrap();
    let before = api.num_constraints();
    chip.print_f(&a);
    chip.print_e(&e);
    assert_eq!(api.num_constraints(), before);

    let prints = api.prints();
    assert_eq!(prints.len(), 2);
    assert!(prints[0].ends_with(": 2"));
    assert!(prints[1].ends_with(": [1, 2, 3, 4]"));
}
