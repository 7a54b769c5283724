use super::{CircuitApi, Var};
use num_bigint::BigUint;
use p3_field::FieldAlgebra;

/// Constrains the little-endian `bits` to encode an integer `<= bound`.
///
/// Walks from the most significant bit while tracking whether the prefix so far
/// equals the prefix of `bound`. Where `bound` has a zero, a matching prefix
/// forces the bit to zero.
pub fn assert_bits_le_const<A: CircuitApi>(api: &A, bits: &[Var<A::N>], bound: &BigUint) {
    // None stands for the constant 1 before any set bit of `bound` is seen.
    let mut prefix_eq: Option<Var<A::N>> = None;
    for (i, bit) in bits.iter().enumerate().rev() {
        if bound.bit(i as u64) {
            prefix_eq = Some(match prefix_eq {
                Some(eq) => api.mul(eq, *bit),
                None => *bit,
            });
        } else {
            match prefix_eq {
                Some(eq) => api.assert_mul_is_zero(eq, *bit),
                None => {
                    let zero = api.constant(A::N::ZERO);
                    api.assert_is_equal(*bit, zero);
                }
            }
        }
    }
}

/// Constrains `bits` to be the canonical encoding of an element of a field of
/// order `modulus`, i.e. `bits <= modulus - 1`.
pub fn less_than_modulus<A: CircuitApi>(api: &A, bits: &[Var<A::N>], modulus: &BigUint) {
    let bound = modulus - BigUint::from(1u32);
    assert_bits_le_const(api, bits, &bound);
}
