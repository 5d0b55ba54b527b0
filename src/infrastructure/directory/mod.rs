use crate::core::errors::LedgerError;
use crate::core::models::member::MemberProfile;
use async_trait::async_trait;

/// User directory collaborator. The ledger only ever holds opaque member
/// ids; this resolves them to display name and email for settlement labels
/// and notification text.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn resolve(&self, member_id: &str) -> Result<Option<MemberProfile>, LedgerError>;
}

pub mod in_memory;
