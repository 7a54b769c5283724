use super::{BabyBearChip, Felt};
use crate::{
    machine::{CircuitApi, Var},
    primitives::consts::{LIMB_BITS, NUM_LIMBS_PER_NATIVE, PACKING_SHIFT_BITS},
};
use core::array;
use p3_field::{Field, FieldAlgebra};
use tracing::instrument;

impl<A: CircuitApi> BabyBearChip<'_, A> {
    /// Little-endian bits of the canonical value of `a`, 32 of them. The top
    /// bit is always zero.
    pub fn to_bits(&self, a: Felt<A::N>) -> Vec<Var<A::N>> {
        self.field.to_bits(a.0)
    }

    /// Little-endian bits of `a`, constraining its canonical value to `num_bits` bits.
    pub fn num2bits_f(&self, a: Felt<A::N>, num_bits: usize) -> Vec<Var<A::N>> {
        let reduced = self.field.reduce(a.0);
        self.api.to_binary(reduced.var, num_bits)
    }

    pub fn range_check_f(&self, a: Felt<A::N>, num_bits: usize) {
        self.num2bits_f(a, num_bits);
    }

    /// Recomposes little-endian bits into a felt, weighting bit `i` by `2^i mod p`.
    /// The bits must be boolean-constrained.
    pub fn bits2num_f(&self, bits: &[Var<A::N>]) -> Felt<A::N> {
        Felt(self.field.from_bits(bits))
    }

    /// Splits a native element into `num_limbs` little-endian 32-bit limbs.
    ///
    /// Limb `i` holds bits `32 * i .. 32 * i + 32` of the canonical native value;
    /// bits past the native width read as zero. Limbs at or above p are left
    /// unreduced and read modulo p.
    #[instrument(name = "split_32", level = "debug", skip_all)]
    pub fn split_32(&self, value: Var<A::N>, num_limbs: usize) -> Vec<Felt<A::N>> {
        let bits = self.api.to_binary(value, A::N::bits());
        (0..num_limbs)
            .map(|i| {
                let start = (i * LIMB_BITS).min(bits.len());
                let end = ((i + 1) * LIMB_BITS).min(bits.len());
                let limb = self.api.from_binary(&bits[start..end]);
                Felt(self.field.new_element(limb, end - start))
            })
            .collect()
    }

    /// Splits a native element into the eight BabyBear-sized limbs of [`Self::split_32`].
    pub fn split_into_babybear(&self, value: Var<A::N>) -> [Felt<A::N>; NUM_LIMBS_PER_NATIVE] {
        let limbs = self.split_32(value, NUM_LIMBS_PER_NATIVE);
        array::from_fn(|i| limbs[i])
    }

    /// Packs canonical felts as `sum(felt_i * 2^(32 * i))`, modulo the native order.
    pub fn reduce_32(&self, felts: &[Felt<A::N>]) -> Var<A::N> {
        let terms = felts
            .iter()
            .enumerate()
            .map(|(i, felt)| {
                let reduced = self.field.reduce(felt.0);
                (reduced.var, A::N::TWO.exp_u64((i * LIMB_BITS) as u64))
            })
            .collect::<Vec<_>>();
        self.api.lin_comb(&terms)
    }

    /// Packs eight felts into one native element, shifting by 31 bits per word.
    /// The first word ends up most significant.
    pub fn felts_to_bn254_var(&self, words: &[Felt<A::N>; NUM_LIMBS_PER_NATIVE]) -> Var<A::N> {
        let terms = words
            .iter()
            .rev()
            .enumerate()
            .map(|(i, word)| {
                let reduced = self.field.reduce(word.0);
                (
                    reduced.var,
                    A::N::TWO.exp_u64((i * PACKING_SHIFT_BITS) as u64),
                )
            })
            .collect::<Vec<_>>();
        self.api.lin_comb(&terms)
    }
}
