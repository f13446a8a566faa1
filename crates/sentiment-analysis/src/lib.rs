pub mod lexicon;
pub mod scorer;
pub mod unusual;

pub use lexicon::*;
pub use scorer::*;
pub use unusual::*;
