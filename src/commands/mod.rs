pub mod generate;
pub mod inspect;

pub use generate::*;
pub use inspect::*;
