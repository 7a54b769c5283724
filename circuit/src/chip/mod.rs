mod base;
mod decompose;
mod extension;

#[cfg(test)]
mod tests;

use crate::{
    emulator::{BabyBearParams, Element, EmulatedField, EmulationError, EmulationOpts},
    machine::{CircuitApi, Var},
    primitives::consts::EXTENSION_DEGREE,
};
use core::array;
use itertools::Itertools;
use num_bigint::BigUint;
use num_traits::Num;
use p3_baby_bear::BabyBear;
use p3_field::{
    extension::BinomialExtensionField, FieldAlgebra, FieldExtensionAlgebra, PrimeField32,
};
use tracing::debug;

/// The quartic extension `BabyBear[x] / (x^4 - 11)`.
pub type BabyBearExt = BinomialExtensionField<BabyBear, EXTENSION_DEGREE>;

/// A BabyBear element inside the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Felt<N>(pub(crate) Element<N>);

impl<N> Felt<N> {
    pub fn element(&self) -> Element<N> {
        self.0
    }

    /// The native variable holding a representative of the element.
    pub fn var(&self) -> Var<N> {
        self.0.var
    }
}

/// An element of BabyBear[x] / (x^4 - 11), coefficients in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ext<N>(pub [Felt<N>; EXTENSION_DEGREE]);

/// Gadgets for BabyBear and its quartic extension over the native field of `A`.
///
/// Every operation returns fresh values and only registers constraints;
/// failed assertions are reported when the constraint system is checked.
pub struct BabyBearChip<'a, A: CircuitApi> {
    api: &'a A,
    field: EmulatedField<'a, A, BabyBearParams>,
}

impl<'a, A: CircuitApi> BabyBearChip<'a, A> {
    /// Creates the chip with options read from the environment.
    ///
    /// Panics if the native field cannot host the emulation gadget.
    pub fn new(api: &'a A) -> Self {
        match Self::try_new(api, EmulationOpts::default()) {
            Ok(chip) => chip,
            Err(err) => panic!("failed to create the BabyBear emulation gadget: {err}"),
        }
    }

    pub fn try_new(api: &'a A, opts: EmulationOpts) -> Result<Self, EmulationError> {
        let field = EmulatedField::new(api, opts)?;
        debug!("BabyBear chip ready, max overflow = {}", field.max_overflow());
        Ok(Self { api, field })
    }

    pub fn api(&self) -> &'a A {
        self.api
    }

    pub fn field(&self) -> &EmulatedField<'a, A, BabyBearParams> {
        &self.field
    }

    /// Loads a decimal literal, reduced modulo p.
    pub fn new_f(&self, literal: &str) -> Result<Felt<A::N>, EmulationError> {
        let value = BigUint::from_str_radix(literal, 10)
            .map_err(|_| EmulationError::InvalidLiteral(literal.to_string()))?;
        Ok(Felt(self.field.constant(&value)))
    }

    /// Loads four decimal literals as the coefficients c0..c3.
    pub fn new_e(&self, literals: [&str; EXTENSION_DEGREE]) -> Result<Ext<A::N>, EmulationError> {
        let [c0, c1, c2, c3] = literals;
        Ok(Ext([
            self.new_f(c0)?,
            self.new_f(c1)?,
            self.new_f(c2)?,
            self.new_f(c3)?,
        ]))
    }

    pub fn constant_f(&self, value: BabyBear) -> Felt<A::N> {
        Felt(self.field.constant(&BigUint::from(value.as_canonical_u32())))
    }

    pub fn constant_e(&self, value: BabyBearExt) -> Ext<A::N> {
        let coeffs = value.as_base_slice();
        Ext(array::from_fn(|i| self.constant_f(coeffs[i])))
    }

    /// Witness-time value of a felt.
    pub fn value_f(&self, a: &Felt<A::N>) -> BabyBear {
        let value = self.field.value(&a.0);
        // The canonical value is below p and fits in one digit.
        BabyBear::from_canonical_u32(value.to_u32_digits().first().copied().unwrap_or(0))
    }

    /// Witness-time value of an extension element.
    pub fn value_e(&self, a: &Ext<A::N>) -> BabyBearExt {
        let coeffs = a.0.map(|c| self.value_f(&c));
        BabyBearExt::from_base_slice(&coeffs)
    }

    pub fn print_f(&self, a: &Felt<A::N>) {
        self.field.print(&a.var().id(), &a.0);
    }

    pub fn print_e(&self, a: &Ext<A::N>) {
        let coeffs = a.0.iter().map(|c| self.field.value(&c.0)).join(", ");
        self.field
            .println(&format!("{}: [{}]", a.0[0].var().id(), coeffs));
    }

    fn zero_var(&self) -> Var<A::N> {
        self.api.constant(A::N::ZERO)
    }
}
