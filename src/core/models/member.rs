use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Directory record for a member. The ledger itself only ever holds member
/// ids; profiles are resolved through the directory collaborator for
/// settlement labels and notifications.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}
