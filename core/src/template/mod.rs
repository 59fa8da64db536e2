//! Single-pass `{{variable}}` substitution against a row's cells.

mod renderer;

pub use renderer::{render, variables};
