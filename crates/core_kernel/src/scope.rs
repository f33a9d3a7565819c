//! Organisation and branch scoping
//!
//! Every financial record belongs to an organisation and, optionally, to a
//! branch within it. Scope determines visibility (an organisation-level
//! account is usable from any branch) and precedence (a branch-level fund
//! mapping wins over an organisation-level one).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::{BranchId, OrganisationId};

/// The tenancy scope of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    /// Owning organisation
    pub organisation_id: OrganisationId,
    /// Owning branch, when the record is branch-specific
    pub branch_id: Option<BranchId>,
}

impl Scope {
    /// Creates an organisation-wide scope
    pub fn organisation(organisation_id: OrganisationId) -> Self {
        Self {
            organisation_id,
            branch_id: None,
        }
    }

    /// Creates a branch-specific scope
    pub fn branch(organisation_id: OrganisationId, branch_id: BranchId) -> Self {
        Self {
            organisation_id,
            branch_id: Some(branch_id),
        }
    }

    /// Returns true if this scope is branch-specific
    pub fn is_branch_scoped(&self) -> bool {
        self.branch_id.is_some()
    }

    /// Returns true if a record with this scope is visible to a caller
    /// operating under `caller`
    ///
    /// An organisation-wide record is visible from every branch of that
    /// organisation; a branch record is visible only from its own branch
    /// (or from organisation-wide context).
    pub fn visible_to(&self, caller: &Scope) -> bool {
        if self.organisation_id != caller.organisation_id {
            return false;
        }
        match (self.branch_id, caller.branch_id) {
            (None, _) => true,
            (Some(_), None) => true,
            (Some(own), Some(theirs)) => own == theirs,
        }
    }

    /// Specificity rank used when several records match: branch scope
    /// outranks organisation scope.
    pub fn specificity(&self) -> u8 {
        if self.branch_id.is_some() {
            1
        } else {
            0
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.branch_id {
            Some(branch) => write!(f, "{}/{}", self.organisation_id, branch),
            None => write!(f, "{}", self.organisation_id),
        }
    }
}
