use super::{CircuitError, DebuggerMessageLevel};
use crate::machine::ConstraintBuilder;
use log::{error, info};
use p3_field::PrimeField;

/// Evaluates every constraint of a builder against its assignment.
pub struct ConstraintDebugger<'a, N: PrimeField> {
    builder: &'a ConstraintBuilder<N>,
    failures: Vec<(usize, &'static str)>,
    messages: Vec<(DebuggerMessageLevel, String)>,
}

impl<'a, N: PrimeField> ConstraintDebugger<'a, N> {
    pub fn new(builder: &'a ConstraintBuilder<N>) -> Self {
        let mut failures = vec![];
        let mut messages = vec![];
        {
            let values = builder.values();
            for (index, constraint) in builder.constraints().iter().enumerate() {
                let (ab, c) = constraint.evaluate(&values);
                if ab != c {
                    messages.push((
                        DebuggerMessageLevel::Error,
                        format!(
                            "constraint {} ({}) is not satisfied",
                            index, constraint.annotation
                        ),
                    ));
                    messages.push((
                        DebuggerMessageLevel::Debug,
                        format!(
                            "a * b = {}, c = {}",
                            ab.as_canonical_biguint(),
                            c.as_canonical_biguint()
                        ),
                    ));
                    failures.push((index, constraint.annotation));
                }
            }
        }
        messages.push((
            DebuggerMessageLevel::Info,
            format!(
                "variables = {:<10} | constraints = {:<10}",
                builder.num_variables(),
                builder.num_constraints()
            ),
        ));

        Self {
            builder,
            failures,
            messages,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.failures.is_empty()
    }

    /// Index and annotation of each violated constraint.
    pub fn failures(&self) -> &[(usize, &'static str)] {
        &self.failures
    }

    /// Returns the first violated constraint, if any.
    pub fn check(&self) -> Result<(), CircuitError> {
        match self.failures.first() {
            Some(&(index, annotation)) => Err(CircuitError::Unsatisfied { index, annotation }),
            None => Ok(()),
        }
    }

    pub fn messages(&self) -> &[(DebuggerMessageLevel, String)] {
        &self.messages
    }

    pub fn builder(&self) -> &ConstraintBuilder<N> {
        self.builder
    }

    pub fn print_results(self) -> bool {
        let success = self.is_satisfied();

        info!("\n******** Constraints Debugging START ********");

        for message in self.messages {
            match message {
                (DebuggerMessageLevel::Info, msg) => log::info!("{}", msg),
                (DebuggerMessageLevel::Debug, msg) => log::debug!("{}", msg),
                (DebuggerMessageLevel::Error, msg) => log::error!("{}", msg),
            }
        }

        if success {
            info!("Constraints success!");
        } else {
            error!("Constraints failed!");
        }

        info!("\n******** Constraints Debugging END ********");

        success
    }
}
