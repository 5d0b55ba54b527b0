use crate::core::models::group::Group;
use crate::core::models::settlement::Transfer;
use std::collections::BTreeMap;
use tracing::debug;

/// Net position per member: total paid minus total owed across all splits.
///
/// Every current member is keyed, including members with no activity (zero
/// balance). The ledger is a closed system, so the balances always sum to
/// zero: every unit paid is split among members.
pub fn balances(group: &Group) -> BTreeMap<String, i64> {
    let mut balances: BTreeMap<String, i64> = group
        .member_ids
        .iter()
        .map(|id| (id.clone(), 0))
        .collect();

    for expense in &group.expenses {
        *balances.entry(expense.payer_id.clone()).or_insert(0) += expense.amount_minor;
        for split in &expense.splits {
            *balances.entry(split.member_id.clone()).or_insert(0) -= split.amount_minor;
        }
    }

    debug!(group_id = %group.id, ?balances, "balances computed");
    balances
}

/// Greedy bipartite netting of the group's balances into a transfer list.
///
/// Creditors (balance > 0, owed money) and debtors (balance < 0) are each
/// iterated in ascending member-id order, so the output is reproducible
/// regardless of expense insertion order. Each match settles
/// `min(remaining debt, remaining credit)`; zero-amount transfers are never
/// emitted. Applying every transfer zeroes all balances. The result is a
/// correct netting but not necessarily minimum transfer count; true minimal
/// cardinality is a subset-matching problem not attempted here.
pub fn settle(group: &Group) -> Vec<Transfer> {
    let balance_map = balances(group);

    // BTreeMap iteration gives ascending member-id order on both sides.
    let mut creditors: Vec<(String, i64)> = balance_map
        .iter()
        .filter(|&(_, &bal)| bal > 0)
        .map(|(id, &bal)| (id.clone(), bal))
        .collect();
    let mut debtors: Vec<(String, i64)> = balance_map
        .iter()
        .filter(|&(_, &bal)| bal < 0)
        .map(|(id, &bal)| (id.clone(), -bal))
        .collect();

    let mut transfers = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < creditors.len() && j < debtors.len() {
        let amount = creditors[i].1.min(debtors[j].1);
        if amount > 0 {
            transfers.push(Transfer {
                debtor_id: debtors[j].0.clone(),
                creditor_id: creditors[i].0.clone(),
                amount_minor: amount,
            });
        }

        creditors[i].1 -= amount;
        debtors[j].1 -= amount;

        if creditors[i].1 == 0 {
            i += 1;
        }
        if debtors[j].1 == 0 {
            j += 1;
        }
    }

    debug!(group_id = %group.id, count = transfers.len(), "settlement computed");
    transfers
}
