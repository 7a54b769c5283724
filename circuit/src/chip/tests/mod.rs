mod base;
mod decompose;
mod utils;
