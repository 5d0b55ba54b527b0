use crate::core::errors::LedgerError;
use crate::core::models::expense::{Expense, NewExpense};
use crate::core::models::group::Group;
use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

/// Validates a proposed expense against a group and, on success, returns the
/// fully constructed immutable Expense ready for append.
///
/// Pure function, no side effects. Checks short-circuit in order:
/// non-empty description, payer membership, split membership, duplicate
/// split members, exact split-sum equality, sign constraints. Sums are exact `i64` comparisons;
/// there is no rounding slack.
pub fn validate(group: &Group, proposed: &NewExpense) -> Result<Expense, LedgerError> {
    if proposed.description.trim().is_empty() {
        return Err(LedgerError::EmptyDescription);
    }

    if !group.is_member(&proposed.payer_id) {
        return Err(LedgerError::PayerNotMember(proposed.payer_id.clone()));
    }

    for split in &proposed.splits {
        if !group.is_member(&split.member_id) {
            return Err(LedgerError::SplitMemberNotInGroup(split.member_id.clone()));
        }
    }

    let mut seen = HashSet::with_capacity(proposed.splits.len());
    for split in &proposed.splits {
        if !seen.insert(split.member_id.as_str()) {
            return Err(LedgerError::DuplicateSplitMember(split.member_id.clone()));
        }
    }

    let split_sum: i64 = proposed.splits.iter().map(|s| s.amount_minor).sum();
    if split_sum != proposed.amount_minor {
        return Err(LedgerError::SplitSumMismatch {
            expected_minor: proposed.amount_minor,
            actual_minor: split_sum,
        });
    }

    if proposed.amount_minor <= 0 {
        return Err(LedgerError::NonPositiveAmount(proposed.amount_minor));
    }
    for split in &proposed.splits {
        if split.amount_minor < 0 {
            return Err(LedgerError::NegativeSplitAmount {
                member_id: split.member_id.clone(),
                amount_minor: split.amount_minor,
            });
        }
    }

    Ok(Expense {
        id: Uuid::new_v4().to_string(),
        description: proposed.description.clone(),
        amount_minor: proposed.amount_minor,
        payer_id: proposed.payer_id.clone(),
        splits: proposed.splits.clone(),
        created_at: Utc::now(),
    })
}
