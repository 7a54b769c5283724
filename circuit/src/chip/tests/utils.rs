use crate::{
    chip::{BabyBearChip, BabyBearExt},
    emulator::EmulationOpts,
    machine::{debug::ConstraintDebugger, ConstraintBuilder},
    primitives::consts::{BABYBEAR_MODULUS, EXTENSION_DEGREE},
};
use core::array;
use p3_baby_bear::BabyBear;
use p3_bn254_fr::Bn254Fr;
use p3_field::{FieldAlgebra, FieldExtensionAlgebra};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub type Api = ConstraintBuilder<Bn254Fr>;

pub fn chip(api: &Api) -> BabyBearChip<'_, Api> {
    BabyBearChip::try_new(api, EmulationOpts::default().with_debug_print(true)).unwrap()
}

pub fn is_satisfied(api: &Api) -> bool {
    ConstraintDebugger::new(api).is_satisfied()
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0xbabe_bea7)
}

pub fn random_f(rng: &mut impl Rng) -> BabyBear {
    BabyBear::from_canonical_u32(rng.gen_range(0..BABYBEAR_MODULUS))
}

pub fn random_nonzero_f(rng: &mut impl Rng) -> BabyBear {
    BabyBear::from_canonical_u32(rng.gen_range(1..BABYBEAR_MODULUS))
}

pub fn random_e(rng: &mut impl Rng) -> BabyBearExt {
    let coeffs: [BabyBear; EXTENSION_DEGREE] = array::from_fn(|_| random_f(rng));
    BabyBearExt::from_base_slice(&coeffs)
}

pub fn ext(coeffs: [u32; EXTENSION_DEGREE]) -> BabyBearExt {
    BabyBearExt::from_base_slice(&coeffs.map(BabyBear::from_canonical_u32))
}
