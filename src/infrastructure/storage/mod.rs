use crate::core::errors::LedgerError;
use crate::core::models::group::Group;
use async_trait::async_trait;

/// Persistence collaborator. Receives the full group aggregate after every
/// committed mutation and loads it back by id in the same shape.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_group(&self, group: Group) -> Result<(), LedgerError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError>;
    async fn groups_for_member(&self, member_id: &str) -> Result<Vec<Group>, LedgerError>;
}

pub mod in_memory;
