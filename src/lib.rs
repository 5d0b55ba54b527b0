pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::LedgerError;
pub use crate::core::service::LedgerService;
pub use infrastructure::directory::in_memory::InMemoryDirectory;
pub use infrastructure::notify::in_memory::InMemoryNotifier;
pub use infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
