use crate::core::errors::LedgerError;
use crate::core::models::expense::Expense;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Group lifecycle. Transitions only move forward:
/// Open -> Finalized -> Closed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupState {
    Open,
    Finalized,
    Closed,
}

impl std::fmt::Display for GroupState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GroupState::Open => "OPEN",
            GroupState::Finalized => "FINALIZED",
            GroupState::Closed => "CLOSED",
        };
        write!(f, "{}", s)
    }
}

/// A shared ledger scoping a set of members and their expenses.
///
/// Members are opaque ids owned by the external directory. The owner is
/// always a member; the member list is never empty. The expense sequence is
/// append-only.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub member_ids: Vec<String>,
    pub expenses: Vec<Expense>,
    pub state: GroupState,
    #[schema(value_type = String, example = "2026-08-26T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2026-08-26T12:34:56Z")]
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Constructs an Open group. The owner is inserted into the member list
    /// if absent and duplicate member ids are collapsed, preserving first
    /// occurrence order.
    pub fn new(name: String, owner_id: String, member_ids: Vec<String>) -> Result<Self, LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::EmptyGroupName);
        }
        if member_ids.is_empty() {
            return Err(LedgerError::EmptyMemberList);
        }

        let mut members: Vec<String> = Vec::with_capacity(member_ids.len() + 1);
        members.push(owner_id.clone());
        for id in member_ids {
            if !members.contains(&id) {
                members.push(id);
            }
        }

        let now = Utc::now();
        Ok(Group {
            id: Uuid::new_v4().to_string(),
            name,
            owner_id,
            member_ids: members,
            expenses: Vec::new(),
            state: GroupState::Open,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_member(&self, member_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == member_id)
    }

    pub fn is_owner(&self, member_id: &str) -> bool {
        self.owner_id == member_id
    }

    pub(crate) fn ensure_state(&self, expected: GroupState) -> Result<(), LedgerError> {
        if self.state != expected {
            return Err(LedgerError::InvalidState {
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }

    /// Appends a validated expense. Legal only while the group is Open.
    pub fn append_expense(&mut self, expense: Expense) -> Result<(), LedgerError> {
        self.ensure_state(GroupState::Open)?;
        self.expenses.push(expense);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Open -> Finalized. Locks expense entry.
    pub fn finalize(&mut self) -> Result<(), LedgerError> {
        self.ensure_state(GroupState::Open)?;
        self.state = GroupState::Finalized;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Finalized -> Closed. Terminal; no further state changes.
    pub fn close(&mut self) -> Result<(), LedgerError> {
        self.ensure_state(GroupState::Finalized)?;
        self.state = GroupState::Closed;
        self.updated_at = Utc::now();
        Ok(())
    }
}
