use crate::primitives::consts::NUM_LIMBS_PER_NATIVE;
use core::fmt::Debug;
use num_bigint::BigUint;

/// Static description of an emulated modulus and its limb layout.
pub trait FieldParameters: Copy + Default + Debug + 'static {
    const NB_LIMBS: usize;
    const NB_BITS_PER_LIMB: usize;
    const IS_PRIME: bool;

    /// The bytes of the modulus in little-endian order.
    const MODULUS: &'static [u8];

    /// How many emulated elements one native element is unpacked into.
    const NUM_ELMS_PER_NATIVE_ELM: usize;

    fn modulus() -> BigUint {
        BigUint::from_bytes_le(Self::MODULUS)
    }

    fn modulus_bits() -> usize {
        Self::modulus().bits() as usize
    }

    fn num_bits() -> usize {
        Self::NB_BITS_PER_LIMB * Self::NB_LIMBS
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BabyBearParams;

impl FieldParameters for BabyBearParams {
    const NB_LIMBS: usize = 1;
    const NB_BITS_PER_LIMB: usize = 32;
    const IS_PRIME: bool = true;
    const MODULUS: &'static [u8] = &[0x01, 0x00, 0x00, 0x78];
    const NUM_ELMS_PER_NATIVE_ELM: usize = NUM_LIMBS_PER_NATIVE;
}
