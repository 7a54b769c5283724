/// BabyBear modulus, 2^31 - 2^27 + 1.
pub const BABYBEAR_MODULUS: u32 = 0x7800_0001;

/// Bit length of the BabyBear modulus.
pub const BABYBEAR_NUM_BITS: usize = 31;

/// Non-residue of the quartic extension, x^4 = W.
pub const BABYBEAR_W: u32 = 11;

pub const EXTENSION_DEGREE: usize = 4;

/// Width of a limb when unpacking native elements.
pub const LIMB_BITS: usize = 32;

/// Number of 32-bit limbs a native element is split into.
pub const NUM_LIMBS_PER_NATIVE: usize = 8;

/// Shift between words when packing BabyBear values into one native element.
pub const PACKING_SHIFT_BITS: usize = 31;
