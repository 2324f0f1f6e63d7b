pub mod history_files;
pub mod share_links;

pub use history_files::*;
pub use share_links::*;
