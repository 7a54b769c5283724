pub mod element;
pub mod error;
pub mod field;
pub mod opts;
pub mod params;

pub use element::Element;
pub use error::EmulationError;
pub use field::EmulatedField;
pub use opts::EmulationOpts;
pub use params::{BabyBearParams, FieldParameters};
