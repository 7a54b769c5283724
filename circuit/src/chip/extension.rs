use super::{BabyBearChip, BabyBearExt, Ext, Felt};
use crate::{
    emulator::Element,
    machine::{CircuitApi, Var},
    primitives::consts::{BABYBEAR_W, EXTENSION_DEGREE as D},
};
use core::{array, iter::zip};
use itertools::Itertools;
use num_bigint::BigUint;
use p3_field::{Field, FieldAlgebra, FieldExtensionAlgebra, PrimeField32};
use tracing::instrument;

impl<A: CircuitApi> BabyBearChip<'_, A> {
    pub fn add_e(&self, a: Ext<A::N>, b: Ext<A::N>) -> Ext<A::N> {
        Ext(array::from_fn(|i| self.add_f(a.0[i], b.0[i])))
    }

    pub fn sub_e(&self, a: Ext<A::N>, b: Ext<A::N>) -> Ext<A::N> {
        Ext(array::from_fn(|i| self.sub_f(a.0[i], b.0[i])))
    }

    pub fn neg_e(&self, a: Ext<A::N>) -> Ext<A::N> {
        Ext(a.0.map(|c| self.neg_f(c)))
    }

    /// Adds a base element to the constant coefficient.
    pub fn add_ef(&self, a: Ext<A::N>, b: Felt<A::N>) -> Ext<A::N> {
        let mut out = a;
        out.0[0] = self.add_f(a.0[0], b);
        out
    }

    pub fn sub_ef(&self, a: Ext<A::N>, b: Felt<A::N>) -> Ext<A::N> {
        let mut out = a;
        out.0[0] = self.sub_f(a.0[0], b);
        out
    }

    pub fn mul_ef(&self, a: Ext<A::N>, b: Felt<A::N>) -> Ext<A::N> {
        Ext(a.0.map(|c| self.mul_f(c, b)))
    }

    /// Product in BabyBear[x] / (x^4 - W).
    ///
    /// The schoolbook coefficients `v[0..=6]` are accumulated without reduction,
    /// then `x^(k+4) = W * x^k` folds `v[k + 4]` into `v[k]` and each output
    /// coefficient is reduced once.
    pub fn mul_e(&self, a: Ext<A::N>, b: Ext<A::N>) -> Ext<A::N> {
        let field = &self.field;
        let v: [Element<A::N>; 2 * D - 1] = array::from_fn(|k| {
            let lo = k.saturating_sub(D - 1);
            let hi = k.min(D - 1);
            (lo..=hi)
                .map(|i| field.mul_no_reduce(a.0[i].0, b.0[k - i].0))
                .reduce(|acc, term| field.add(acc, term))
                .unwrap_or_else(|| field.zero())
        });

        let w = BigUint::from(BABYBEAR_W);
        Ext(array::from_fn(|k| {
            let coeff = if k + D < 2 * D - 1 {
                field.add(v[k], field.mul_const(v[k + D], &w))
            } else {
                v[k]
            };
            Felt(field.reduce(coeff))
        }))
    }

    /// Multiplicative inverse.
    ///
    /// The inverse is hinted and `a * inv == 1` is constrained. The zero element
    /// has no inverse: its hint is zero and the system becomes unsatisfiable.
    #[instrument(name = "inv_e", level = "debug", skip_all)]
    pub fn inv_e(&self, a: Ext<A::N>) -> Ext<A::N> {
        let value = self.value_e(&a);
        let inv_value = value.try_inverse().unwrap_or(BabyBearExt::ZERO);
        let coeffs = inv_value.as_base_slice();
        let inv = Ext(array::from_fn(|i| {
            Felt(
                self.field
                    .hint(&BigUint::from(coeffs[i].as_canonical_u32())),
            )
        }));

        let product = self.mul_e(a, inv);
        let one = self.constant_e(BabyBearExt::ONE);
        self.assert_ext_eq(product, one);
        inv
    }

    /// `a * b^-1`, unsatisfiable for `b == 0`.
    pub fn div_e(&self, a: Ext<A::N>, b: Ext<A::N>) -> Ext<A::N> {
        let inv = self.inv_e(b);
        self.mul_e(a, inv)
    }

    pub fn assert_ext_eq(&self, a: Ext<A::N>, b: Ext<A::N>) {
        for (x, y) in a.0.into_iter().zip_eq(b.0) {
            self.assert_felt_eq(x, y);
        }
    }

    /// Asserts that at least one coefficient differs.
    pub fn assert_ext_ne(&self, a: Ext<A::N>, b: Ext<A::N>) {
        let is_zero: [Var<A::N>; D] = array::from_fn(|i| {
            let diff = self.field.sub(a.0[i].0, b.0[i].0);
            self.field.is_zero(diff)
        });
        let all_zero = self.api.and(
            self.api.and(is_zero[0], is_zero[1]),
            self.api.and(is_zero[2], is_zero[3]),
        );
        self.api.assert_is_equal(all_zero, self.zero_var());
    }

    /// Coordinatewise select. `cond` must be boolean-constrained by the caller.
    pub fn select_e(&self, cond: Var<A::N>, a: Ext<A::N>, b: Ext<A::N>) -> Ext<A::N> {
        Ext(array::from_fn(|i| self.select_f(cond, a.0[i], b.0[i])))
    }

    /// Returns `first ++ second`, or `second ++ first` when `should_swap` is 1.
    pub fn select_chain_ef(
        &self,
        should_swap: Var<A::N>,
        first: impl IntoIterator<Item = Ext<A::N>> + Clone,
        second: impl IntoIterator<Item = Ext<A::N>> + Clone,
    ) -> Vec<Ext<A::N>> {
        let id_branch = first.clone().into_iter().chain(second.clone());
        let swap_branch = second.into_iter().chain(first);
        zip(id_branch, swap_branch)
            .map(|(id_v, sw_v)| self.select_e(should_swap, sw_v, id_v))
            .collect()
    }

    pub fn ext2felt(&self, a: Ext<A::N>) -> [Felt<A::N>; D] {
        a.0
    }

    pub fn felts2ext(&self, felts: [Felt<A::N>; D]) -> Ext<A::N> {
        Ext(felts)
    }
}
