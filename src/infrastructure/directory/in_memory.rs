use crate::core::errors::LedgerError;
use crate::core::models::member::MemberProfile;
use crate::infrastructure::directory::Directory;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryDirectory {
    profiles: Arc<RwLock<HashMap<String, MemberProfile>>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        InMemoryDirectory {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn register(&self, profile: MemberProfile) {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.id.clone(), profile);
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn resolve(&self, member_id: &str) -> Result<Option<MemberProfile>, LedgerError> {
        Ok(self.profiles.read().await.get(member_id).cloned())
    }
}
