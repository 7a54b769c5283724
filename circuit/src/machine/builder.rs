use core::marker::PhantomData;
use p3_field::{FieldAlgebra, PrimeField};

/// A variable that represents a native field element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Var<N> {
    pub idx: u32,
    _marker: PhantomData<N>,
}

impl<N> Var<N> {
    pub const fn new(idx: u32) -> Self {
        Self {
            idx,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> String {
        format!("var{}", self.idx)
    }
}

/// Native constraint-system primitives.
///
/// Witness values are known while the circuit is being built, so every
/// method that allocates a variable also assigns it. Assertions only add
/// constraints; whether they hold is decided when the system is checked.
pub trait CircuitApi {
    type N: PrimeField;

    /// Loads a constant.
    fn constant(&self, value: Self::N) -> Var<Self::N>;

    /// Allocates an unconstrained variable holding `value`.
    fn witness(&self, value: Self::N) -> Var<Self::N>;

    /// Reads the assigned value of a variable.
    fn value(&self, var: Var<Self::N>) -> Self::N;

    fn add(&self, a: Var<Self::N>, b: Var<Self::N>) -> Var<Self::N>;

    fn sub(&self, a: Var<Self::N>, b: Var<Self::N>) -> Var<Self::N>;

    fn mul(&self, a: Var<Self::N>, b: Var<Self::N>) -> Var<Self::N>;

    fn add_const(&self, a: Var<Self::N>, c: Self::N) -> Var<Self::N>;

    fn mul_const(&self, a: Var<Self::N>, c: Self::N) -> Var<Self::N>;

    /// Computes `sum(coeff * var)` with a single constraint.
    fn lin_comb(&self, terms: &[(Var<Self::N>, Self::N)]) -> Var<Self::N>;

    fn assert_is_equal(&self, a: Var<Self::N>, b: Var<Self::N>);

    fn assert_is_boolean(&self, a: Var<Self::N>);

    /// Constrains `a * b == 0`.
    fn assert_mul_is_zero(&self, a: Var<Self::N>, b: Var<Self::N>);

    /// Decomposes `a` into `num_bits` little-endian bits.
    ///
    /// When `num_bits` covers the whole native field the bits are also bounded
    /// by the field order, which makes the decomposition unique.
    fn to_binary(&self, a: Var<Self::N>, num_bits: usize) -> Vec<Var<Self::N>>;

    /// Recomposes little-endian bits. The bits are not re-checked.
    fn from_binary(&self, bits: &[Var<Self::N>]) -> Var<Self::N> {
        if bits.is_empty() {
            return self.constant(Self::N::ZERO);
        }
        let mut pow = Self::N::ONE;
        let terms = bits
            .iter()
            .map(|bit| {
                let term = (*bit, pow);
                pow = pow.double();
                term
            })
            .collect::<Vec<_>>();
        self.lin_comb(&terms)
    }

    /// Boolean AND of two bits.
    fn and(&self, a: Var<Self::N>, b: Var<Self::N>) -> Var<Self::N> {
        self.mul(a, b)
    }

    /// Returns 1 if `a` is zero and 0 otherwise.
    fn is_zero(&self, a: Var<Self::N>) -> Var<Self::N>;

    /// Returns `a` if `cond` is 1 and `b` if `cond` is 0. `cond` must already be boolean.
    fn select(&self, cond: Var<Self::N>, a: Var<Self::N>, b: Var<Self::N>) -> Var<Self::N>;

    /// Emits a witness-time diagnostic line. Adds no constraints.
    fn println(&self, msg: &str);
}
