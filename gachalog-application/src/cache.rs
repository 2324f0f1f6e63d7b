pub mod history_cache;
pub mod sweeper;

pub use history_cache::*;
pub use sweeper::*;
