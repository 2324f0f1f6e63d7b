// Gachalog Application Layer

pub mod cache;
pub mod commands;
pub mod error;
pub mod metrics;
pub mod queries;
pub mod registry;
pub mod state;

pub use cache::HistoryCache;
pub use error::AppError;
pub use metrics::Metrics;
pub use registry::GameRegistry;
pub use state::AppState;

#[cfg(test)]
pub(crate) mod test_support;
