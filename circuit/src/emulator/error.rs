use thiserror::Error;

/// Errors raised while configuring the emulation gadget or loading values into it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmulationError {
    /// Only single-limb moduli are supported.
    #[error("unsupported limb count {0}, expected 1")]
    UnsupportedLimbCount(usize),

    /// The limb cannot hold a full residue.
    #[error("limb of {limb_bits} bits is narrower than the {modulus_bits}-bit modulus")]
    LimbTooNarrow {
        limb_bits: usize,
        modulus_bits: usize,
    },

    /// Inversion and division need a prime modulus.
    #[error("modulus is not declared prime")]
    NotPrime,

    /// The native field cannot hold a product of two residues with any headroom.
    #[error("native field of {native_bits} bits leaves no overflow headroom for a {modulus_bits}-bit modulus")]
    NativeFieldTooSmall {
        native_bits: usize,
        modulus_bits: usize,
    },

    /// A constant literal could not be parsed as a decimal integer.
    #[error("invalid decimal literal {0:?}")]
    InvalidLiteral(String),
}
