use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One member's owed share of an expense. Owned exclusively by its Expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Split {
    pub member_id: String,
    pub amount_minor: i64,
}

/// A single payment by one member, divided among members via splits.
///
/// Immutable once constructed: expenses are only ever appended to a group,
/// never edited or deleted. Construction goes through the split validator,
/// which guarantees that the splits sum exactly to `amount_minor`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount_minor: i64,
    pub payer_id: String,
    pub splits: Vec<Split>,
    #[schema(value_type = String, example = "2026-08-26T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

/// Proposed expense, before validation against a group.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewExpense {
    pub payer_id: String,
    pub description: String,
    pub amount_minor: i64,
    pub splits: Vec<Split>,
}
