use crate::core::errors::LedgerError;
use crate::infrastructure::notify::{ExpenseNotice, GroupNotice, Notifier, SettlementNotice};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Records every notice instead of delivering it. Stands in for a mail
/// gateway in the dev server and in tests.
#[derive(Clone, Default)]
pub struct InMemoryNotifier {
    group_created: Arc<RwLock<Vec<GroupNotice>>>,
    expense_added: Arc<RwLock<Vec<ExpenseNotice>>>,
    group_finalized: Arc<RwLock<Vec<SettlementNotice>>>,
    group_closed: Arc<RwLock<Vec<SettlementNotice>>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn group_created_notices(&self) -> Vec<GroupNotice> {
        self.group_created.read().await.clone()
    }

    pub async fn expense_added_notices(&self) -> Vec<ExpenseNotice> {
        self.expense_added.read().await.clone()
    }

    pub async fn group_finalized_notices(&self) -> Vec<SettlementNotice> {
        self.group_finalized.read().await.clone()
    }

    pub async fn group_closed_notices(&self) -> Vec<SettlementNotice> {
        self.group_closed.read().await.clone()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn group_created(&self, notice: GroupNotice) -> Result<(), LedgerError> {
        self.group_created.write().await.push(notice);
        Ok(())
    }

    async fn expense_added(&self, notice: ExpenseNotice) -> Result<(), LedgerError> {
        self.expense_added.write().await.push(notice);
        Ok(())
    }

    async fn group_finalized(&self, notice: SettlementNotice) -> Result<(), LedgerError> {
        self.group_finalized.write().await.push(notice);
        Ok(())
    }

    async fn group_closed(&self, notice: SettlementNotice) -> Result<(), LedgerError> {
        self.group_closed.write().await.push(notice);
        Ok(())
    }
}
