mod lifecycle_tests;

use crate::core::models::expense::{NewExpense, Split};
use crate::core::models::member::MemberProfile;
use crate::core::service::LedgerService;
use crate::infrastructure::directory::in_memory::InMemoryDirectory;
use crate::infrastructure::notify::in_memory::InMemoryNotifier;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub type TestService = LedgerService<InMemoryStorage, InMemoryDirectory, InMemoryNotifier>;

/// Service over in-memory collaborators with Alice, Bob and Carol registered
/// in the directory. The returned notifier handle shares state with the one
/// inside the service.
pub async fn create_test_service() -> (TestService, InMemoryNotifier) {
    let storage = InMemoryStorage::new();
    let directory = InMemoryDirectory::new();
    let notifier = InMemoryNotifier::new();

    for (id, name) in [("a", "Alice"), ("b", "Bob"), ("c", "Carol")] {
        directory
            .register(MemberProfile {
                id: id.to_string(),
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
            })
            .await;
    }

    let service = LedgerService::new(storage, directory, notifier.clone());
    (service, notifier)
}

pub fn split(member_id: &str, amount_minor: i64) -> Split {
    Split {
        member_id: member_id.to_string(),
        amount_minor,
    }
}

pub fn expense(payer_id: &str, description: &str, amount_minor: i64, splits: Vec<Split>) -> NewExpense {
    NewExpense {
        payer_id: payer_id.to_string(),
        description: description.to_string(),
        amount_minor,
        splits,
    }
}
