use utoipa::OpenApi;

use crate::{
    api::{
        handlers::GroupWithSettlement,
        models::{
            AddExpenseRequest, CloseGroupRequest, CreateGroupRequest, ErrorResponse,
            FinalizeGroupRequest, GetSettlementRequest, RegisterMemberRequest,
        },
    },
    core::models::{
        expense::{Expense, Split},
        group::{Group, GroupState},
        member::MemberProfile,
        settlement::{SettlementSummary, Transfer},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::register_member,
        super::handlers::list_member_groups,
        super::handlers::create_group,
        super::handlers::get_group,
        super::handlers::add_expense,
        super::handlers::finalize_group,
        super::handlers::close_group,
        super::handlers::get_settlement
    ),
    components(schemas(
        RegisterMemberRequest,
        CreateGroupRequest,
        AddExpenseRequest,
        FinalizeGroupRequest,
        CloseGroupRequest,
        GetSettlementRequest,
        ErrorResponse,
        MemberProfile,
        Group,
        GroupState,
        Expense,
        Split,
        Transfer,
        SettlementSummary,
        GroupWithSettlement
    )),
    info(
        title = "Splitledger API",
        description = "API for pooling group expenses and computing settlements",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
