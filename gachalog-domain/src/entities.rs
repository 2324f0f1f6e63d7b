// Domain entities
pub mod gacha_item;
pub mod gacha_log_query;
pub mod history_record;
pub mod runtime_config;
pub mod share_link;

pub use gacha_item::*;
pub use gacha_log_query::*;
pub use history_record::*;
pub use runtime_config::*;
pub use share_link::*;
