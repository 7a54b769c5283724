use crate::machine::Var;

/// An emulated field element held in one native variable.
///
/// The native value `v` is some representative of the residue with
/// `v < modulus * 2^overflow`. An overflow of zero means `v` is canonical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<N> {
    pub var: Var<N>,
    pub overflow: usize,
}

impl<N> Element<N> {
    pub const fn new(var: Var<N>, overflow: usize) -> Self {
        Self { var, overflow }
    }

    pub const fn is_reduced(&self) -> bool {
        self.overflow == 0
    }
}
