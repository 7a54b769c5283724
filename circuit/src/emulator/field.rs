use super::{Element, EmulationError, EmulationOpts, FieldParameters};
use crate::machine::{bits::less_than_modulus, utils::biguint_to_field, CircuitApi, Var};
use core::marker::PhantomData;
use num_bigint::BigUint;
use p3_field::{Field, FieldAlgebra, PrimeField};
use tracing::debug;

/// Arithmetic modulo `P::modulus()` over the native field of `A`.
///
/// Results of additive operations are left unreduced and their overflow is
/// tracked; operands are reduced automatically once an operation would exceed
/// the overflow bound. Multiplications and inverses return canonical values.
pub struct EmulatedField<'a, A: CircuitApi, P: FieldParameters> {
    api: &'a A,
    modulus: BigUint,
    modulus_native: A::N,
    modulus_bits: usize,
    max_overflow: usize,
    debug_print: bool,
    _params: PhantomData<P>,
}

impl<'a, A: CircuitApi, P: FieldParameters> EmulatedField<'a, A, P> {
    pub fn new(api: &'a A, opts: EmulationOpts) -> Result<Self, EmulationError> {
        if P::NB_LIMBS != 1 {
            return Err(EmulationError::UnsupportedLimbCount(P::NB_LIMBS));
        }
        let modulus = P::modulus();
        let modulus_bits = P::modulus_bits();
        if P::NB_BITS_PER_LIMB < modulus_bits {
            return Err(EmulationError::LimbTooNarrow {
                limb_bits: P::NB_BITS_PER_LIMB,
                modulus_bits,
            });
        }
        if !P::IS_PRIME {
            return Err(EmulationError::NotPrime);
        }

        // A product of two operands must stay below the native order, and the
        // sum of two products must be representable without reducing.
        let native_bits = A::N::bits();
        let headroom = native_bits
            .checked_sub(2 + 2 * modulus_bits)
            .filter(|headroom| *headroom >= modulus_bits + 2)
            .ok_or(EmulationError::NativeFieldTooSmall {
                native_bits,
                modulus_bits,
            })?;
        let max_overflow = opts
            .max_overflow
            .map_or(headroom, |max| max.clamp(modulus_bits + 2, headroom));
        debug!(
            "emulated field: modulus = {}, native bits = {}, max overflow = {}",
            modulus, native_bits, max_overflow
        );

        Ok(Self {
            api,
            modulus_native: biguint_to_field(&modulus),
            modulus,
            modulus_bits,
            max_overflow,
            debug_print: opts.debug_print,
            _params: PhantomData,
        })
    }

    pub fn api(&self) -> &'a A {
        self.api
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn max_overflow(&self) -> usize {
        self.max_overflow
    }

    /// Loads a constant, reduced modulo the emulated modulus.
    pub fn constant(&self, value: &BigUint) -> Element<A::N> {
        let reduced = value % &self.modulus;
        Element::new(self.api.constant(biguint_to_field(&reduced)), 0)
    }

    pub fn zero(&self) -> Element<A::N> {
        Element::new(self.api.constant(A::N::ZERO), 0)
    }

    pub fn one(&self) -> Element<A::N> {
        Element::new(self.api.constant(A::N::ONE), 0)
    }

    /// Wraps a native variable that is known to fit in `num_bits` bits.
    ///
    /// Variables too wide for `max_overflow` are decomposed and recomposed
    /// through [`Self::from_bits`].
    pub fn new_element(&self, var: Var<A::N>, num_bits: usize) -> Element<A::N> {
        // 2^num_bits <= 2^(modulus_bits - 1) * 2^overflow < modulus * 2^overflow
        let overflow = num_bits.saturating_sub(self.modulus_bits - 1);
        if overflow <= self.max_overflow {
            return Element::new(var, overflow);
        }
        debug!(
            "splitting a {}-bit element, overflow {} exceeds {}",
            num_bits, overflow, self.max_overflow
        );
        let bits = self.api.to_binary(var, num_bits);
        self.from_bits(&bits)
    }

    /// Recomposes little-endian bits with coefficients `2^i mod modulus`.
    ///
    /// The bits must be boolean-constrained. Each term is below the modulus,
    /// so the overflow grows with `log2(bits.len())` only.
    pub fn from_bits(&self, bits: &[Var<A::N>]) -> Element<A::N> {
        if bits.is_empty() {
            return self.zero();
        }
        let mut pow = BigUint::from(1u32);
        let terms = bits
            .iter()
            .map(|bit| {
                let term = (*bit, biguint_to_field(&pow));
                pow = (&pow << 1u32) % &self.modulus;
                term
            })
            .collect::<Vec<_>>();
        let value = self.api.lin_comb(&terms);
        // sum < len * modulus <= modulus * 2^ceil(log2(len))
        let overflow = (usize::BITS - (bits.len() - 1).leading_zeros()) as usize;
        debug_assert!(overflow <= self.max_overflow);
        Element::new(value, overflow)
    }

    /// Canonical value of `a` at witness time.
    pub fn value(&self, a: &Element<A::N>) -> BigUint {
        self.api.value(a.var).as_canonical_biguint() % &self.modulus
    }

    /// Allocates a hinted value and constrains it to be below the modulus.
    pub fn hint(&self, value: &BigUint) -> Element<A::N> {
        let reduced = value % &self.modulus;
        let var = self.api.witness(biguint_to_field(&reduced));
        let bits = self.api.to_binary(var, self.modulus_bits);
        less_than_modulus(self.api, &bits, &self.modulus);
        Element::new(var, 0)
    }

    /// Returns the canonical representative of `a`.
    ///
    /// Witnesses `a = q * modulus + r` with `q < 2^overflow` and `r < modulus`.
    /// Both sides stay below the native order, so the equation holds over the
    /// integers and `r` is unique.
    pub fn reduce(&self, a: Element<A::N>) -> Element<A::N> {
        if a.is_reduced() {
            return a;
        }
        let value = self.api.value(a.var).as_canonical_biguint();
        let quotient = &value / &self.modulus;
        let remainder = &value % &self.modulus;

        let q = self.api.witness(biguint_to_field(&quotient));
        self.api.to_binary(q, a.overflow);
        let r = self.hint(&remainder);

        let recomposed = self
            .api
            .lin_comb(&[(q, self.modulus_native), (r.var, A::N::ONE)]);
        self.api.assert_is_equal(recomposed, a.var);
        r
    }

    fn prepare_linear(
        &self,
        a: Element<A::N>,
        b: Element<A::N>,
    ) -> (Element<A::N>, Element<A::N>) {
        if a.overflow.max(b.overflow) + 1 > self.max_overflow {
            (self.reduce(a), self.reduce(b))
        } else {
            (a, b)
        }
    }

    fn prepare_mul(&self, a: Element<A::N>, b: Element<A::N>) -> (Element<A::N>, Element<A::N>) {
        let fits = |a: &Element<A::N>, b: &Element<A::N>| {
            a.overflow + b.overflow + self.modulus_bits <= self.max_overflow
        };
        if fits(&a, &b) {
            return (a, b);
        }
        let (a, b) = if a.overflow >= b.overflow {
            (self.reduce(a), b)
        } else {
            (a, self.reduce(b))
        };
        if fits(&a, &b) {
            return (a, b);
        }
        (self.reduce(a), self.reduce(b))
    }

    /// `modulus * 2^overflow` as a native constant, used to keep differences non-negative.
    fn padding(&self, overflow: usize) -> A::N {
        self.modulus_native * A::N::TWO.exp_u64(overflow as u64)
    }

    pub fn add(&self, a: Element<A::N>, b: Element<A::N>) -> Element<A::N> {
        let (a, b) = self.prepare_linear(a, b);
        let sum = self.api.add(a.var, b.var);
        Element::new(sum, a.overflow.max(b.overflow) + 1)
    }

    pub fn sub(&self, a: Element<A::N>, b: Element<A::N>) -> Element<A::N> {
        let (a, b) = self.prepare_linear(a, b);
        let one = self.api.constant(A::N::ONE);
        let diff = self.api.lin_comb(&[
            (a.var, A::N::ONE),
            (b.var, A::N::NEG_ONE),
            (one, self.padding(b.overflow)),
        ]);
        Element::new(diff, a.overflow.max(b.overflow) + 1)
    }

    pub fn neg(&self, a: Element<A::N>) -> Element<A::N> {
        let a = if a.overflow + 1 > self.max_overflow {
            self.reduce(a)
        } else {
            a
        };
        let one = self.api.constant(A::N::ONE);
        let negated = self
            .api
            .lin_comb(&[(one, self.padding(a.overflow)), (a.var, A::N::NEG_ONE)]);
        Element::new(negated, a.overflow + 1)
    }

    /// Native product of the representatives, without reduction.
    pub fn mul_no_reduce(&self, a: Element<A::N>, b: Element<A::N>) -> Element<A::N> {
        let (a, b) = self.prepare_mul(a, b);
        let product = self.api.mul(a.var, b.var);
        Element::new(product, a.overflow + b.overflow + self.modulus_bits)
    }

    pub fn mul(&self, a: Element<A::N>, b: Element<A::N>) -> Element<A::N> {
        let product = self.mul_no_reduce(a, b);
        self.reduce(product)
    }

    /// Multiplies by a constant, reduced modulo the modulus first.
    pub fn mul_const(&self, a: Element<A::N>, c: &BigUint) -> Element<A::N> {
        let c = c % &self.modulus;
        let c_bits = c.bits() as usize;
        let a = if a.overflow + c_bits > self.max_overflow {
            self.reduce(a)
        } else {
            a
        };
        let scaled = self.api.mul_const(a.var, biguint_to_field(&c));
        Element::new(scaled, a.overflow + c_bits)
    }

    /// Hints the inverse and constrains `a * inv == 1`.
    ///
    /// For `a == 0` the hint is zero and the constraint cannot be satisfied, so
    /// the failure shows up when the system is checked.
    pub fn inverse(&self, a: Element<A::N>) -> Element<A::N> {
        let a = self.reduce(a);
        let inv_value = self.pow_inverse(&self.value(&a));
        let inv = self.hint(&inv_value);

        let product = self.mul(a, inv);
        let one = self.api.constant(A::N::ONE);
        self.api.assert_is_equal(product.var, one);
        inv
    }

    /// Hints `a / b` and constrains `b * q == a`.
    ///
    /// For `b == 0` the constraint only holds when `a == 0`, in which case `q`
    /// is unconstrained.
    pub fn div(&self, a: Element<A::N>, b: Element<A::N>) -> Element<A::N> {
        let a = self.reduce(a);
        let b = self.reduce(b);
        let q_value = (self.value(&a) * self.pow_inverse(&self.value(&b))) % &self.modulus;
        let q = self.hint(&q_value);

        let product = self.mul(b, q);
        self.api.assert_is_equal(product.var, a.var);
        q
    }

    /// Fermat inverse; maps zero to zero.
    fn pow_inverse(&self, value: &BigUint) -> BigUint {
        let exp = &self.modulus - BigUint::from(2u32);
        value.modpow(&exp, &self.modulus)
    }

    /// Returns `a` if `cond` is 1 and `b` if `cond` is 0. `cond` must already be boolean.
    pub fn select(
        &self,
        cond: Var<A::N>,
        a: Element<A::N>,
        b: Element<A::N>,
    ) -> Element<A::N> {
        let selected = self.api.select(cond, a.var, b.var);
        Element::new(selected, a.overflow.max(b.overflow))
    }

    /// Returns a native 0/1 flag that is 1 iff `a` is zero modulo the modulus.
    pub fn is_zero(&self, a: Element<A::N>) -> Var<A::N> {
        let a = self.reduce(a);
        self.api.is_zero(a.var)
    }

    pub fn assert_is_equal(&self, a: Element<A::N>, b: Element<A::N>) {
        let a = self.reduce(a);
        let b = self.reduce(b);
        self.api.assert_is_equal(a.var, b.var);
    }

    /// Little-endian bits of the canonical value, `P::num_bits()` of them.
    pub fn to_bits(&self, a: Element<A::N>) -> Vec<Var<A::N>> {
        let a = self.reduce(a);
        self.api.to_binary(a.var, P::num_bits())
    }

    /// Prints the canonical value of `a` without adding constraints.
    pub fn print(&self, label: &str, a: &Element<A::N>) {
        self.println(&format!("{}: {}", label, self.value(a)));
    }

    pub fn println(&self, msg: &str) {
        if self.debug_print {
            self.api.println(msg);
        }
    }
}
