use super::{bits::less_than_modulus, CircuitApi, Var};
use hashbrown::HashMap;
use p3_field::{Field, FieldAlgebra, PrimeField};
use std::cell::{Ref, RefCell};
use tracing::info;

/// Sparse linear combination over the assignment vector, as `(index, coefficient)` pairs.
pub type LinearCombination<N> = Vec<(usize, N)>;

/// `<a, w> * <b, w> = <c, w>`
#[derive(Debug, Clone)]
pub struct R1csConstraint<N> {
    pub a: LinearCombination<N>,
    pub b: LinearCombination<N>,
    pub c: LinearCombination<N>,
    /// Name of the primitive that emitted the constraint.
    pub annotation: &'static str,
}

impl<N: Field> R1csConstraint<N> {
    pub fn is_satisfied(&self, values: &[N]) -> bool {
        let (ab, c) = self.evaluate(values);
        ab == c
    }

    /// Returns `<a, w> * <b, w>` and `<c, w>` for the assignment `w`.
    pub fn evaluate(&self, values: &[N]) -> (N, N) {
        (
            eval(&self.a, values) * eval(&self.b, values),
            eval(&self.c, values),
        )
    }
}

fn eval<N: Field>(lc: &[(usize, N)], values: &[N]) -> N {
    lc.iter().map(|(idx, coeff)| values[*idx] * *coeff).sum()
}

#[derive(Debug)]
struct State<N> {
    values: Vec<N>,
    constraints: Vec<R1csConstraint<N>>,
    consts: HashMap<N, Var<N>>,
    prints: Vec<String>,
}

/// An R1CS builder that assigns witness values as variables are allocated.
///
/// Index 0 of the assignment is the constant one.
#[derive(Debug)]
pub struct ConstraintBuilder<N: PrimeField> {
    state: RefCell<State<N>>,
}

impl<N: PrimeField> Default for ConstraintBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: PrimeField> ConstraintBuilder<N> {
    const ONE: usize = 0;

    pub fn new() -> Self {
        let mut consts = HashMap::new();
        consts.insert(N::ONE, Var::new(Self::ONE as u32));
        Self {
            state: RefCell::new(State {
                values: vec![N::ONE],
                constraints: vec![],
                consts,
                prints: vec![],
            }),
        }
    }

    pub fn num_variables(&self) -> usize {
        self.state.borrow().values.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.state.borrow().constraints.len()
    }

    pub fn constraints(&self) -> Ref<'_, [R1csConstraint<N>]> {
        Ref::map(self.state.borrow(), |state| state.constraints.as_slice())
    }

    pub fn values(&self) -> Ref<'_, [N]> {
        Ref::map(self.state.borrow(), |state| state.values.as_slice())
    }

    /// Lines emitted through [`CircuitApi::println`], in order.
    pub fn prints(&self) -> Vec<String> {
        self.state.borrow().prints.clone()
    }

    /// Overwrites an assigned value, as a dishonest prover would.
    #[cfg(test)]
    pub(crate) fn override_value(&self, var: Var<N>, value: N) {
        self.state.borrow_mut().values[var.idx as usize] = value;
    }

    fn alloc(&self, value: N) -> Var<N> {
        let mut state = self.state.borrow_mut();
        let idx = state.values.len();
        state.values.push(value);
        Var::new(idx as u32)
    }

    fn enforce(
        &self,
        a: LinearCombination<N>,
        b: LinearCombination<N>,
        c: LinearCombination<N>,
        annotation: &'static str,
    ) {
        self.state.borrow_mut().constraints.push(R1csConstraint {
            a,
            b,
            c,
            annotation,
        });
    }

    fn get(&self, var: Var<N>) -> N {
        self.state.borrow().values[var.idx as usize]
    }

    /// Allocates `value` as the output of the linear combination `terms`.
    fn linear(&self, terms: LinearCombination<N>, value: N, annotation: &'static str) -> Var<N> {
        let out = self.alloc(value);
        self.enforce(
            terms,
            vec![(Self::ONE, N::ONE)],
            vec![(out.idx as usize, N::ONE)],
            annotation,
        );
        out
    }
}

impl<N: PrimeField> CircuitApi for ConstraintBuilder<N> {
    type N = N;

    fn constant(&self, value: N) -> Var<N> {
        if let Some(var) = self.state.borrow().consts.get(&value) {
            return *var;
        }
        let var = self.alloc(value);
        self.enforce(
            vec![(var.idx as usize, N::ONE)],
            vec![(Self::ONE, N::ONE)],
            vec![(Self::ONE, value)],
            "constant",
        );
        self.state.borrow_mut().consts.insert(value, var);
        var
    }

    fn witness(&self, value: N) -> Var<N> {
        self.alloc(value)
    }

    fn value(&self, var: Var<N>) -> N {
        self.get(var)
    }

    fn add(&self, a: Var<N>, b: Var<N>) -> Var<N> {
        let value = self.get(a) + self.get(b);
        self.linear(
            vec![(a.idx as usize, N::ONE), (b.idx as usize, N::ONE)],
            value,
            "add",
        )
    }

    fn sub(&self, a: Var<N>, b: Var<N>) -> Var<N> {
        let value = self.get(a) - self.get(b);
        self.linear(
            vec![(a.idx as usize, N::ONE), (b.idx as usize, N::NEG_ONE)],
            value,
            "sub",
        )
    }

    fn mul(&self, a: Var<N>, b: Var<N>) -> Var<N> {
        let out = self.alloc(self.get(a) * self.get(b));
        self.enforce(
            vec![(a.idx as usize, N::ONE)],
            vec![(b.idx as usize, N::ONE)],
            vec![(out.idx as usize, N::ONE)],
            "mul",
        );
        out
    }

    fn add_const(&self, a: Var<N>, c: N) -> Var<N> {
        let value = self.get(a) + c;
        self.linear(
            vec![(a.idx as usize, N::ONE), (Self::ONE, c)],
            value,
            "add_const",
        )
    }

    fn mul_const(&self, a: Var<N>, c: N) -> Var<N> {
        let value = self.get(a) * c;
        self.linear(vec![(a.idx as usize, c)], value, "mul_const")
    }

    fn lin_comb(&self, terms: &[(Var<N>, N)]) -> Var<N> {
        let value = terms
            .iter()
            .map(|(var, coeff)| self.get(*var) * *coeff)
            .sum::<N>();
        let lc = terms
            .iter()
            .map(|(var, coeff)| (var.idx as usize, *coeff))
            .collect();
        self.linear(lc, value, "lin_comb")
    }

    fn assert_is_equal(&self, a: Var<N>, b: Var<N>) {
        self.enforce(
            vec![(a.idx as usize, N::ONE)],
            vec![(Self::ONE, N::ONE)],
            vec![(b.idx as usize, N::ONE)],
            "assert_is_equal",
        );
    }

    fn assert_is_boolean(&self, a: Var<N>) {
        self.enforce(
            vec![(a.idx as usize, N::ONE)],
            vec![(a.idx as usize, N::ONE), (Self::ONE, N::NEG_ONE)],
            vec![],
            "assert_is_boolean",
        );
    }

    fn assert_mul_is_zero(&self, a: Var<N>, b: Var<N>) {
        self.enforce(
            vec![(a.idx as usize, N::ONE)],
            vec![(b.idx as usize, N::ONE)],
            vec![],
            "assert_mul_is_zero",
        );
    }

    fn to_binary(&self, a: Var<N>, num_bits: usize) -> Vec<Var<N>> {
        let value = self.get(a).as_canonical_biguint();
        let bits = (0..num_bits)
            .map(|i| {
                let bit = self.alloc(N::from_bool(value.bit(i as u64)));
                self.assert_is_boolean(bit);
                bit
            })
            .collect::<Vec<_>>();

        let mut pow = N::ONE;
        let mut recomposed = Vec::with_capacity(num_bits);
        for bit in bits.iter() {
            recomposed.push((bit.idx as usize, pow));
            pow = pow.double();
        }
        self.enforce(
            recomposed,
            vec![(Self::ONE, N::ONE)],
            vec![(a.idx as usize, N::ONE)],
            "to_binary",
        );

        if num_bits >= N::bits() {
            less_than_modulus(self, &bits, &N::order());
        }

        bits
    }

    fn is_zero(&self, a: Var<N>) -> Var<N> {
        let value = self.get(a);
        let out = self.alloc(N::from_bool(value.is_zero()));
        let inv = self.alloc(value.try_inverse().unwrap_or(N::ZERO));
        // a * inv = 1 - out
        self.enforce(
            vec![(a.idx as usize, N::ONE)],
            vec![(inv.idx as usize, N::ONE)],
            vec![(Self::ONE, N::ONE), (out.idx as usize, N::NEG_ONE)],
            "is_zero",
        );
        // a * out = 0
        self.enforce(
            vec![(a.idx as usize, N::ONE)],
            vec![(out.idx as usize, N::ONE)],
            vec![],
            "is_zero",
        );
        out
    }

    fn select(&self, cond: Var<N>, a: Var<N>, b: Var<N>) -> Var<N> {
        let (c, va, vb) = (self.get(cond), self.get(a), self.get(b));
        let out = self.alloc(vb + c * (va - vb));
        // cond * (a - b) = out - b
        self.enforce(
            vec![(cond.idx as usize, N::ONE)],
            vec![(a.idx as usize, N::ONE), (b.idx as usize, N::NEG_ONE)],
            vec![(out.idx as usize, N::ONE), (b.idx as usize, N::NEG_ONE)],
            "select",
        );
        out
    }

    fn println(&self, msg: &str) {
        info!("{}", msg);
        self.state.borrow_mut().prints.push(msg.to_string());
    }
}
