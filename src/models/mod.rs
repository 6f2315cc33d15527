//! CSP models of concrete puzzles.

pub mod tenner;
