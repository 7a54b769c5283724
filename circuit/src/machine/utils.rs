use crate::primitives::consts::{NUM_LIMBS_PER_NATIVE, PACKING_SHIFT_BITS};
use num_bigint::BigUint;
use p3_bn254_fr::Bn254Fr;
use p3_field::{FieldAlgebra, PrimeField, PrimeField32};

/// Maps an integer into a prime field, reducing modulo the field order.
pub fn biguint_to_field<N: PrimeField>(value: &BigUint) -> N {
    let base = N::from_canonical_u64(1 << 32);
    value
        .to_u32_digits()
        .iter()
        .rev()
        .fold(N::ZERO, |acc, digit| {
            acc * base + N::from_canonical_u32(*digit)
        })
}

/// Convert 8 BabyBear or KoalaBear words into a Bn254Fr field element by shifting by 31 bits each time. The last
/// word becomes the least significant bits.
pub fn fields_to_bn254<F: PrimeField32>(words: &[F; NUM_LIMBS_PER_NATIVE]) -> Bn254Fr {
    let mut result = Bn254Fr::ZERO;
    for word in words.iter() {
        // 8 * 31 = 248 bits, which stays below the Bn254 modulus.
        result *= Bn254Fr::from_canonical_u64(1 << PACKING_SHIFT_BITS);
        result += Bn254Fr::from_canonical_u32(word.as_canonical_u32());
    }
    result
}
