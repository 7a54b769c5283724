use super::{BabyBearChip, Felt};
use crate::machine::{CircuitApi, Var};
use core::iter::zip;

impl<A: CircuitApi> BabyBearChip<'_, A> {
    pub fn add_f(&self, a: Felt<A::N>, b: Felt<A::N>) -> Felt<A::N> {
        Felt(self.field.add(a.0, b.0))
    }

    pub fn sub_f(&self, a: Felt<A::N>, b: Felt<A::N>) -> Felt<A::N> {
        Felt(self.field.sub(a.0, b.0))
    }

    pub fn mul_f(&self, a: Felt<A::N>, b: Felt<A::N>) -> Felt<A::N> {
        Felt(self.field.mul(a.0, b.0))
    }

    pub fn neg_f(&self, a: Felt<A::N>) -> Felt<A::N> {
        Felt(self.field.neg(a.0))
    }

    /// Multiplicative inverse. For a zero input the system becomes unsatisfiable.
    pub fn inv_f(&self, a: Felt<A::N>) -> Felt<A::N> {
        Felt(self.field.inverse(a.0))
    }

    /// `a / b`. With `b == 0` the system is unsatisfiable unless `a == 0`, and
    /// then the quotient is unconstrained.
    pub fn div_f(&self, a: Felt<A::N>, b: Felt<A::N>) -> Felt<A::N> {
        Felt(self.field.div(a.0, b.0))
    }

    pub fn assert_felt_eq(&self, a: Felt<A::N>, b: Felt<A::N>) {
        self.field.assert_is_equal(a.0, b.0);
    }

    pub fn assert_felt_ne(&self, a: Felt<A::N>, b: Felt<A::N>) {
        let diff = self.field.sub(a.0, b.0);
        let is_zero = self.field.is_zero(diff);
        self.api.assert_is_equal(is_zero, self.zero_var());
    }

    /// Returns `a` if `cond` is 1, else `b`. `cond` must be boolean-constrained by the caller.
    pub fn select_f(&self, cond: Var<A::N>, a: Felt<A::N>, b: Felt<A::N>) -> Felt<A::N> {
        Felt(self.field.select(cond, a.0, b.0))
    }

    /// Returns `first ++ second`, or `second ++ first` when `should_swap` is 1.
    pub fn select_chain_f(
        &self,
        should_swap: Var<A::N>,
        first: impl IntoIterator<Item = Felt<A::N>> + Clone,
        second: impl IntoIterator<Item = Felt<A::N>> + Clone,
    ) -> Vec<Felt<A::N>> {
        let id_branch = first.clone().into_iter().chain(second.clone());
        let swap_branch = second.into_iter().chain(first);
        zip(id_branch, swap_branch)
            .map(|(id_v, sw_v)| self.select_f(should_swap, sw_v, id_v))
            .collect()
    }

    /// Raises `input` to the power whose big-endian bits are `power_bits`.
    pub fn exp_reverse_bits(&self, input: Felt<A::N>, power_bits: &[Var<A::N>]) -> Felt<A::N> {
        let mut result = Felt(self.field.one());
        let mut power_f = input;
        for bit in power_bits.iter().rev() {
            let prod = self.mul_f(result, power_f);
            result = self.select_f(*bit, prod, result);
            power_f = self.mul_f(power_f, power_f);
        }
        result
    }
}
