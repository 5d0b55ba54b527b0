use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// One leg of a settlement: the debtor pays the creditor. Amounts are always
/// strictly positive; zero-amount transfers are never emitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Transfer {
    pub debtor_id: String,
    pub creditor_id: String,
    pub amount_minor: i64,
}

/// Settlement output: the transfer list in deterministic member-id order plus
/// a human-readable mapping keyed `"<debtor> owes <creditor>"`, labeled with
/// display names resolved through the directory.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SettlementSummary {
    pub transfers: Vec<Transfer>,
    pub labeled: BTreeMap<String, i64>,
}
