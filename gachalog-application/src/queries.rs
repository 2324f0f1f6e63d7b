pub mod gacha_log_queries;
