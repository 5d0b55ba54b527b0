use crate::core::models::group::GroupState;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
pub enum LedgerError {
    /// Group name is empty or whitespace
    #[error("Group name cannot be empty")]
    EmptyGroupName,

    /// Group would have no members
    #[error("Group must have at least one member")]
    EmptyMemberList,

    /// Expense description is empty or whitespace
    #[error("Expense description cannot be empty")]
    EmptyDescription,

    /// Expense total must be strictly positive
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    /// A split carries a negative amount
    #[error("Split for member {member_id} is negative: {amount_minor}")]
    NegativeSplitAmount { member_id: String, amount_minor: i64 },

    /// Splits do not sum to the expense total, compared exactly in minor units
    #[error("Split total {actual_minor} does not equal expense amount {expected_minor}")]
    SplitSumMismatch {
        expected_minor: i64,
        actual_minor: i64,
    },

    /// The same member appears in more than one split
    #[error("Member {0} appears more than once in the splits")]
    DuplicateSplitMember(String),

    /// The payer is not a member of the group
    #[error("Payer {0} is not a group member")]
    PayerNotMember(String),

    /// A split references someone outside the group
    #[error("Split member {0} is not a group member")]
    SplitMemberNotInGroup(String),

    /// Caller is not a member of the group
    #[error("Member {0} is not a group member")]
    NotGroupMember(String),

    /// Owner-only operation attempted by someone else
    #[error("Member {0} is not the group owner")]
    NotGroupOwner(String),

    /// Operation attempted in the wrong lifecycle state
    #[error("Operation requires the group to be {expected}, but it is {actual}")]
    InvalidState {
        expected: GroupState,
        actual: GroupState,
    },

    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Directory error: {0}")]
    DirectoryError(String),

    #[error("Notification error: {0}")]
    NotificationError(String),
}
