pub mod indicators;
pub mod patterns;
pub mod scorer;

#[cfg(test)]
mod indicators_tests;

pub use indicators::*;
pub use patterns::*;
pub use scorer::*;
