// Domain value objects
pub mod game;
pub mod identifiers;

pub use game::*;
pub use identifiers::*;
