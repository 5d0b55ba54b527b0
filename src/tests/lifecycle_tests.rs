use crate::core::errors::LedgerError;
use crate::core::models::group::GroupState;
use crate::infrastructure::notify::{ExpenseNotice, GroupNotice, Notifier, SettlementNotice};
use crate::tests::{create_test_service, expense, split};
use async_trait::async_trait;
use serde_json::json;

async fn trip_group(service: &crate::tests::TestService) -> String {
    let group = service
        .create_group("Trip".to_string(), "a".to_string(), vec!["b".to_string(), "c".to_string()])
        .await
        .unwrap();
    service
        .add_expense(
            &group.id,
            expense("a", "Dinner", 9000, vec![split("a", 3000), split("b", 3000), split("c", 3000)]),
        )
        .await
        .unwrap();
    group.id
}

#[tokio::test]
async fn test_finalize_transitions_to_finalized() {
    let (service, _) = create_test_service().await;
    let group_id = trip_group(&service).await;

    let (group, summary) = service.finalize(&group_id, "a").await.unwrap();
    assert_eq!(group.state, GroupState::Finalized);
    assert!(!summary.transfers.is_empty());
}

#[tokio::test]
async fn test_add_expense_rejected_after_finalize() {
    let (service, _) = create_test_service().await;
    let group_id = trip_group(&service).await;
    service.finalize(&group_id, "a").await.unwrap();

    let result = service
        .add_expense(&group_id, expense("b", "Taxi", 3000, vec![split("b", 3000)]))
        .await;
    assert!(matches!(
        result,
        Err(LedgerError::InvalidState {
            expected: GroupState::Open,
            actual: GroupState::Finalized,
        })
    ));
}

#[tokio::test]
async fn test_add_expense_rejected_after_close() {
    let (service, _) = create_test_service().await;
    let group_id = trip_group(&service).await;
    service.finalize(&group_id, "a").await.unwrap();
    service.close(&group_id, "a", None).await.unwrap();

    let result = service
        .add_expense(&group_id, expense("b", "Taxi", 3000, vec![split("b", 3000)]))
        .await;
    assert!(matches!(
        result,
        Err(LedgerError::InvalidState {
            expected: GroupState::Open,
            actual: GroupState::Closed,
        })
    ));
}

#[tokio::test]
async fn test_state_check_precedes_expense_validation() {
    let (service, _) = create_test_service().await;
    let group_id = trip_group(&service).await;
    service.finalize(&group_id, "a").await.unwrap();

    // The splits do not sum to the amount either; the state error wins
    let result = service
        .add_expense(&group_id, expense("a", "Late fee", 1000, vec![split("b", 999)]))
        .await;
    assert!(matches!(
        result,
        Err(LedgerError::InvalidState {
            expected: GroupState::Open,
            actual: GroupState::Finalized,
        })
    ));
}

#[tokio::test]
async fn test_finalize_by_non_owner_rejected() {
    let (service, _) = create_test_service().await;
    let group_id = trip_group(&service).await;

    let result = service.finalize(&group_id, "b").await;
    assert!(matches!(result, Err(LedgerError::NotGroupOwner(id)) if id == "b"));

    let group = service.get_group(&group_id).await.unwrap();
    assert_eq!(group.state, GroupState::Open);
}

#[tokio::test]
async fn test_finalize_twice_rejected() {
    let (service, _) = create_test_service().await;
    let group_id = trip_group(&service).await;

    service.finalize(&group_id, "a").await.unwrap();
    let result = service.finalize(&group_id, "a").await;
    assert!(matches!(
        result,
        Err(LedgerError::InvalidState {
            expected: GroupState::Open,
            actual: GroupState::Finalized,
        })
    ));
}

#[tokio::test]
async fn test_close_requires_finalized_state() {
    let (service, _) = create_test_service().await;
    let group_id = trip_group(&service).await;

    let result = service.close(&group_id, "a", None).await;
    assert!(matches!(
        result,
        Err(LedgerError::InvalidState {
            expected: GroupState::Finalized,
            actual: GroupState::Open,
        })
    ));
}

#[tokio::test]
async fn test_close_by_non_owner_rejected() {
    let (service, _) = create_test_service().await;
    let group_id = trip_group(&service).await;
    service.finalize(&group_id, "a").await.unwrap();

    let result = service.close(&group_id, "c", None).await;
    assert!(matches!(result, Err(LedgerError::NotGroupOwner(id)) if id == "c"));
}

#[tokio::test]
async fn test_second_close_fails_and_leaves_ledger_unchanged() {
    let (service, _) = create_test_service().await;
    let group_id = trip_group(&service).await;
    service.finalize(&group_id, "a").await.unwrap();
    let (closed, _) = service.close(&group_id, "a", None).await.unwrap();

    let result = service.close(&group_id, "a", None).await;
    assert!(matches!(
        result,
        Err(LedgerError::InvalidState {
            expected: GroupState::Finalized,
            actual: GroupState::Closed,
        })
    ));

    let reloaded = service.get_group(&group_id).await.unwrap();
    assert_eq!(reloaded.state, GroupState::Closed);
    assert_eq!(reloaded.expenses.len(), closed.expenses.len());
    assert_eq!(reloaded.updated_at, closed.updated_at);
}

#[tokio::test]
async fn test_close_returns_same_settlement_as_finalize() {
    let (service, _) = create_test_service().await;
    let group_id = trip_group(&service).await;

    let (_, at_finalize) = service.finalize(&group_id, "a").await.unwrap();
    let (_, at_close) = service.close(&group_id, "a", None).await.unwrap();

    assert_eq!(at_finalize.transfers, at_close.transfers);
}

#[tokio::test]
async fn test_finalize_missing_group() {
    let (service, _) = create_test_service().await;
    let result = service.finalize("missing", "a").await;
    assert!(matches!(result, Err(LedgerError::GroupNotFound(_))));
}

#[tokio::test]
async fn test_settlement_query_requires_membership() {
    let (service, _) = create_test_service().await;
    let group_id = trip_group(&service).await;

    let result = service.settlement(&group_id, "z").await;
    assert!(matches!(result, Err(LedgerError::NotGroupMember(id)) if id == "z"));
}

#[tokio::test]
async fn test_finalize_and_close_notify_members() {
    let (service, notifier) = create_test_service().await;
    let group_id = trip_group(&service).await;

    service.finalize(&group_id, "a").await.unwrap();
    service.close(&group_id, "a", None).await.unwrap();

    let finalized = notifier.group_finalized_notices().await;
    assert_eq!(finalized.len(), 1);
    assert_eq!(finalized[0].total_minor, 9000);
    assert!(finalized[0].chart.is_none());

    let closed = notifier.group_closed_notices().await;
    assert_eq!(closed.len(), 1);
    // With no snapshot supplied, a chart is generated from current balances
    let chart = closed[0].chart.as_ref().unwrap();
    assert_eq!(chart["type"], "bar");
}

#[tokio::test]
async fn test_close_carries_caller_supplied_chart_snapshot() {
    let (service, notifier) = create_test_service().await;
    let group_id = trip_group(&service).await;
    service.finalize(&group_id, "a").await.unwrap();

    let snapshot = json!({ "type": "pie", "data": [60, 30, 10] });
    service.close(&group_id, "a", Some(snapshot.clone())).await.unwrap();

    let closed = notifier.group_closed_notices().await;
    assert_eq!(closed[0].chart, Some(snapshot));
}

/// Notifier whose every delivery fails. Used to prove delivery failures
/// never surface as ledger failures.
struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn group_created(&self, _: GroupNotice) -> Result<(), LedgerError> {
        Err(LedgerError::NotificationError("smtp down".to_string()))
    }

    async fn expense_added(&self, _: ExpenseNotice) -> Result<(), LedgerError> {
        Err(LedgerError::NotificationError("smtp down".to_string()))
    }

    async fn group_finalized(&self, _: SettlementNotice) -> Result<(), LedgerError> {
        Err(LedgerError::NotificationError("smtp down".to_string()))
    }

    async fn group_closed(&self, _: SettlementNotice) -> Result<(), LedgerError> {
        Err(LedgerError::NotificationError("smtp down".to_string()))
    }
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_ledger_operations() {
    use crate::core::service::LedgerService;
    use crate::infrastructure::directory::in_memory::InMemoryDirectory;
    use crate::infrastructure::storage::in_memory::InMemoryStorage;

    let service = LedgerService::new(InMemoryStorage::new(), InMemoryDirectory::new(), FailingNotifier);

    let group = service
        .create_group("Trip".to_string(), "a".to_string(), vec!["b".to_string()])
        .await
        .unwrap();
    service
        .add_expense(&group.id, expense("a", "Dinner", 1000, vec![split("b", 1000)]))
        .await
        .unwrap();
    let (group, _) = service.finalize(&group.id, "a").await.unwrap();
    let (group, _) = service.close(&group.id, "a", None).await.unwrap();

    assert_eq!(group.state, GroupState::Closed);
    assert_eq!(group.expenses.len(), 1);
}
