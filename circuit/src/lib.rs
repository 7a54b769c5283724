#![deny(warnings)]
#![allow(clippy::module_inception)]
#![allow(clippy::needless_range_loop)]

pub mod chip;
pub mod emulator;
pub mod machine;
pub mod primitives;
