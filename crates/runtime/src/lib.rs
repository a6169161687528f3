pub mod generation;
pub mod store;

pub use generation::*;
pub use store::*;
