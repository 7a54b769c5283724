mod constraints;

pub use constraints::ConstraintDebugger;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebuggerMessageLevel {
    Info,
    Debug,
    Error,
}

/// Errors reported when checking an assignment against its constraints.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    /// A constraint does not hold for the assigned witness.
    #[error("constraint {index} ({annotation}) is not satisfied")]
    Unsatisfied {
        index: usize,
        annotation: &'static str,
    },
}
