pub mod engine;
pub mod reasoning;

pub use engine::*;
