pub mod bits;
pub mod builder;
pub mod constraint_system;
pub mod debug;
pub mod logger;
pub mod utils;

pub use builder::{CircuitApi, Var};
pub use constraint_system::ConstraintBuilder;
