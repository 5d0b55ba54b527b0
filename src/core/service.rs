use crate::core::chart;
use crate::core::errors::LedgerError;
use crate::core::models::expense::NewExpense;
use crate::core::models::group::{Group, GroupState};
use crate::core::models::member::MemberProfile;
use crate::core::models::settlement::SettlementSummary;
use crate::core::money;
use crate::core::settlement;
use crate::core::validator;
use crate::infrastructure::directory::Directory;
use crate::infrastructure::notify::{ExpenseNotice, GroupNotice, Notifier, SettlementNotice};
use crate::infrastructure::storage::Storage;
use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Orchestrates the ledger: composes the split validator, the group state
/// machine and the settlement engine over injected collaborators.
///
/// Every mutating operation serializes per group: two concurrent appends to
/// the same group cannot both validate against a stale expense list, and
/// finalize/close check-then-act atomically. Operations on different groups
/// proceed independently.
///
/// Persistence failures abort the operation; notification dispatch happens
/// after the commit and is best-effort (logged, never propagated).
pub struct LedgerService<S: Storage, D: Directory, N: Notifier> {
    storage: S,
    directory: D,
    notifier: N,
    group_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: Storage, D: Directory, N: Notifier> LedgerService<S, D, N> {
    pub fn new(storage: S, directory: D, notifier: N) -> Self {
        LedgerService {
            storage,
            directory,
            notifier,
            group_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    async fn group_lock(&self, group_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.group_locks.lock().await;
        // An entry held only by the map belongs to no in-flight operation;
        // dropping it here keeps the map bounded by concurrent activity
        // rather than by every group id ever seen.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(group_id.to_string()).or_default().clone()
    }

    #[cfg(test)]
    pub(crate) async fn group_lock_count(&self) -> usize {
        self.group_locks.lock().await.len()
    }

    async fn load_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))
    }

    fn ensure_owner(group: &Group, caller_id: &str) -> Result<(), LedgerError> {
        if !group.is_owner(caller_id) {
            return Err(LedgerError::NotGroupOwner(caller_id.to_string()));
        }
        Ok(())
    }

    pub async fn create_group(
        &self,
        name: String,
        owner_id: String,
        member_ids: Vec<String>,
    ) -> Result<Group, LedgerError> {
        info!(%owner_id, name = %name, "creating group");
        let group = Group::new(name, owner_id, member_ids)?;
        self.storage.save_group(group.clone()).await?;
        debug!(group_id = %group.id, members = group.member_ids.len(), "group created");

        let profiles = self.resolve_profiles(&group.member_ids).await;
        let notice = GroupNotice {
            group_id: group.id.clone(),
            group_name: group.name.clone(),
            owner_name: display_name(&profiles, &group.owner_id),
            member_names: group
                .member_ids
                .iter()
                .map(|id| display_name(&profiles, id))
                .collect(),
            recipients: recipients(&profiles),
        };
        if let Err(err) = self.notifier.group_created(notice).await {
            warn!(group_id = %group.id, %err, "group-created notification failed");
        }

        Ok(group)
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        self.load_group(group_id).await
    }

    pub async fn groups_for_member(&self, member_id: &str) -> Result<Vec<Group>, LedgerError> {
        self.storage.groups_for_member(member_id).await
    }

    /// Validates and appends an expense. The payer is the caller; legal only
    /// while the group is Open. A non-Open group rejects the expense before
    /// it is validated. Either the full validation chain passes and the
    /// append is committed, or nothing changes.
    pub async fn add_expense(&self, group_id: &str, proposed: NewExpense) -> Result<Group, LedgerError> {
        info!(%group_id, payer_id = %proposed.payer_id, amount_minor = proposed.amount_minor, "adding expense");
        let lock = self.group_lock(group_id).await;
        let _guard = lock.lock().await;

        let mut group = self.load_group(group_id).await?;
        group.ensure_state(GroupState::Open)?;
        let expense = validator::validate(&group, &proposed)?;
        let splits = expense.splits.clone();
        let description = expense.description.clone();
        let amount_minor = expense.amount_minor;
        group.append_expense(expense)?;
        self.storage.save_group(group.clone()).await?;
        debug!(%group_id, expenses = group.expenses.len(), "expense appended");

        let profiles = self.resolve_profiles(&group.member_ids).await;
        let notice = ExpenseNotice {
            group_id: group.id.clone(),
            group_name: group.name.clone(),
            description,
            amount_minor,
            payer_name: display_name(&profiles, &proposed.payer_id),
            splits,
            recipients: recipients(&profiles),
        };
        if let Err(err) = self.notifier.expense_added(notice).await {
            warn!(%group_id, %err, "expense-added notification failed");
        }

        Ok(group)
    }

    /// Owner-only Open -> Finalized transition. Locks expense entry and
    /// returns the settlement for the current expense set. The settlement is
    /// not frozen; it can be re-queried and is recomputed at close (the
    /// state machine forbids new expenses, so the results are equal).
    pub async fn finalize(
        &self,
        group_id: &str,
        caller_id: &str,
    ) -> Result<(Group, SettlementSummary), LedgerError> {
        info!(%group_id, %caller_id, "finalizing group");
        let lock = self.group_lock(group_id).await;
        let _guard = lock.lock().await;

        let mut group = self.load_group(group_id).await?;
        Self::ensure_owner(&group, caller_id)?;
        group.finalize()?;
        self.storage.save_group(group.clone()).await?;

        let profiles = self.resolve_profiles(&group.member_ids).await;
        let summary = summarize(&group, &profiles);
        let total_minor = total_expenses(&group);
        debug!(
            %group_id,
            total = %money::format_minor(total_minor),
            transfers = summary.transfers.len(),
            "settlement computed at finalize"
        );
        let notice = SettlementNotice {
            group_id: group.id.clone(),
            group_name: group.name.clone(),
            total_minor,
            settlement: summary.clone(),
            chart: None,
            recipients: recipients(&profiles),
        };
        if let Err(err) = self.notifier.group_finalized(notice).await {
            warn!(%group_id, %err, "group-finalized notification failed");
        }

        Ok((group, summary))
    }

    /// Owner-only Finalized -> Closed transition. Terminal. Recomputes the
    /// final settlement snapshot for archival and notification; the
    /// notification carries the caller-supplied chart snapshot, or one
    /// generated from the current balances.
    pub async fn close(
        &self,
        group_id: &str,
        caller_id: &str,
        chart_snapshot: Option<Value>,
    ) -> Result<(Group, SettlementSummary), LedgerError> {
        info!(%group_id, %caller_id, "closing group");
        let lock = self.group_lock(group_id).await;
        let _guard = lock.lock().await;

        let mut group = self.load_group(group_id).await?;
        Self::ensure_owner(&group, caller_id)?;
        group.close()?;
        self.storage.save_group(group.clone()).await?;

        let profiles = self.resolve_profiles(&group.member_ids).await;
        let summary = summarize(&group, &profiles);
        let total_minor = total_expenses(&group);
        debug!(
            %group_id,
            total = %money::format_minor(total_minor),
            transfers = summary.transfers.len(),
            "final settlement snapshot computed"
        );
        let chart = chart_snapshot.unwrap_or_else(|| {
            let labeled: Vec<(String, i64)> = settlement::balances(&group)
                .into_iter()
                .map(|(id, bal)| (display_name(&profiles, &id), bal))
                .collect();
            chart::balance_chart(&group.name, &labeled)
        });
        let notice = SettlementNotice {
            group_id: group.id.clone(),
            group_name: group.name.clone(),
            total_minor,
            settlement: summary.clone(),
            chart: Some(chart),
            recipients: recipients(&profiles),
        };
        if let Err(err) = self.notifier.group_closed(notice).await {
            warn!(%group_id, %err, "group-closed notification failed");
        }

        Ok((group, summary))
    }

    /// Member-only re-query of the current settlement, in any state.
    pub async fn settlement(
        &self,
        group_id: &str,
        caller_id: &str,
    ) -> Result<SettlementSummary, LedgerError> {
        let group = self.load_group(group_id).await?;
        if !group.is_member(caller_id) {
            return Err(LedgerError::NotGroupMember(caller_id.to_string()));
        }
        let profiles = self.resolve_profiles(&group.member_ids).await;
        Ok(summarize(&group, &profiles))
    }

    /// Resolves member profiles for labels and recipients. Directory
    /// failures degrade to unresolved entries; they never fail the ledger
    /// operation.
    async fn resolve_profiles(&self, member_ids: &[String]) -> HashMap<String, MemberProfile> {
        let lookups = member_ids.iter().map(|id| self.directory.resolve(id));
        let mut profiles = HashMap::new();
        for (id, result) in member_ids.iter().zip(futures::future::join_all(lookups).await) {
            match result {
                Ok(Some(profile)) => {
                    profiles.insert(id.clone(), profile);
                }
                Ok(None) => {}
                Err(err) => warn!(member_id = %id, %err, "directory lookup failed"),
            }
        }
        profiles
    }
}

fn display_name(profiles: &HashMap<String, MemberProfile>, member_id: &str) -> String {
    profiles
        .get(member_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| member_id.to_string())
}

fn recipients(profiles: &HashMap<String, MemberProfile>) -> Vec<String> {
    let mut emails: Vec<String> = profiles.values().map(|p| p.email.clone()).collect();
    emails.sort();
    emails
}

fn total_expenses(group: &Group) -> i64 {
    group.expenses.iter().map(|e| e.amount_minor).sum()
}

fn summarize(group: &Group, profiles: &HashMap<String, MemberProfile>) -> SettlementSummary {
    let transfers = settlement::settle(group);
    let labeled: BTreeMap<String, i64> = transfers
        .iter()
        .map(|t| {
            (
                format!(
                    "{} owes {}",
                    display_name(profiles, &t.debtor_id),
                    display_name(profiles, &t.creditor_id)
                ),
                t.amount_minor,
            )
        })
        .collect();
    SettlementSummary { transfers, labeled }
}
