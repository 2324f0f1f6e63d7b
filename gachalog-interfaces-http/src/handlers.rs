pub mod gacha_log_handlers;
pub mod ops_handlers;
pub mod upload_handlers;

pub use gacha_log_handlers::*;
pub use ops_handlers::*;
pub use upload_handlers::*;
