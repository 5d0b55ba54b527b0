use crate::core::errors::LedgerError;
use crate::core::models::expense::Split;
use crate::core::models::settlement::SettlementSummary;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload for the group-creation notification sent to every member.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupNotice {
    pub group_id: String,
    pub group_name: String,
    pub owner_name: String,
    pub member_names: Vec<String>,
    pub recipients: Vec<String>,
}

/// Payload for the expense-added notification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpenseNotice {
    pub group_id: String,
    pub group_name: String,
    pub description: String,
    pub amount_minor: i64,
    pub payer_name: String,
    pub splits: Vec<Split>,
    pub recipients: Vec<String>,
}

/// Payload for the finalize and close notifications. `chart` is only ever
/// present on close.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettlementNotice {
    pub group_id: String,
    pub group_name: String,
    pub total_minor: i64,
    pub settlement: SettlementSummary,
    pub chart: Option<Value>,
    pub recipients: Vec<String>,
}

/// Notification collaborator (email, push, ...). Invoked after a mutation
/// has committed; delivery failures are logged by the service and never
/// surface as ledger-operation failures.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn group_created(&self, notice: GroupNotice) -> Result<(), LedgerError>;
    async fn expense_added(&self, notice: ExpenseNotice) -> Result<(), LedgerError>;
    async fn group_finalized(&self, notice: SettlementNotice) -> Result<(), LedgerError>;
    async fn group_closed(&self, notice: SettlementNotice) -> Result<(), LedgerError>;
}

pub mod in_memory;
