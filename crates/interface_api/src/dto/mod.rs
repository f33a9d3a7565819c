//! Request/response data transfer objects

pub mod funds;
pub mod ledger;
pub mod reconciliation;

use serde::Deserialize;

use core_kernel::{BranchId, OrganisationId, Scope};

/// Tenancy fields shared by most requests
///
/// Authentication is out of scope for this service, so the caller names
/// its scope explicitly on every request.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScopeParams {
    pub organisation_id: OrganisationId,
    pub branch_id: Option<BranchId>,
}

impl From<ScopeParams> for Scope {
    fn from(params: ScopeParams) -> Self {
        match params.branch_id {
            Some(branch) => Scope::branch(params.organisation_id, branch),
            None => Scope::organisation(params.organisation_id),
        }
    }
}
