//! Fund mapping records
//!
//! A fund mapping routes a contribution type to a fund within a scope.
//! Mappings are append-only: remapping deactivates the predecessor and
//! inserts a successor, so the full routing history stays auditable.
//! Invariant: at most one active mapping per (contribution type, scope).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ContributionTypeId, FundId, FundMappingId, OperatorId, Scope};

/// A contribution-type-to-fund routing record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundMapping {
    /// Unique identifier
    pub id: FundMappingId,
    /// Contribution type being routed
    pub contribution_type_id: ContributionTypeId,
    /// Fund contributions of this type post to
    pub fund_id: FundId,
    /// Scope the routing applies to
    pub scope: Scope,
    /// Whether this mapping is the active routing for its scope+type
    pub is_active: bool,
    /// Audit version; incremented on every stored mutation
    pub version: u32,
    /// Operator who created the mapping
    pub created_by: OperatorId,
    /// Operator who last changed the mapping
    pub updated_by: OperatorId,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last-change timestamp
    pub updated_at: DateTime<Utc>,
}

impl FundMapping {
    /// Creates a new active mapping
    pub fn new(
        contribution_type_id: ContributionTypeId,
        fund_id: FundId,
        scope: Scope,
        created_by: OperatorId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: FundMappingId::new_v7(),
            contribution_type_id,
            fund_id,
            scope,
            is_active: true,
            version: 1,
            created_by,
            updated_by: created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a deactivated copy, stamped with the superseding operator
    ///
    /// The predecessor record survives; only its active flag, version,
    /// and update audit fields change.
    pub fn deactivated(&self, by: OperatorId) -> Self {
        let mut superseded = self.clone();
        superseded.is_active = false;
        superseded.version += 1;
        superseded.updated_by = by;
        superseded.updated_at = Utc::now();
        superseded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::OrganisationId;

    #[test]
    fn test_new_mapping_is_active_v1() {
        let mapping = FundMapping::new(
            ContributionTypeId::new(),
            FundId::new(),
            Scope::organisation(OrganisationId::new()),
            OperatorId::new(),
        );

        assert!(mapping.is_active);
        assert_eq!(mapping.version, 1);
        assert_eq!(mapping.created_by, mapping.updated_by);
    }

    #[test]
    fn test_deactivation_preserves_identity() {
        let mapping = FundMapping::new(
            ContributionTypeId::new(),
            FundId::new(),
            Scope::organisation(OrganisationId::new()),
            OperatorId::new(),
        );
        let successor_author = OperatorId::new();
        let superseded = mapping.deactivated(successor_author);

        assert_eq!(superseded.id, mapping.id);
        assert_eq!(superseded.fund_id, mapping.fund_id);
        assert!(!superseded.is_active);
        assert_eq!(superseded.version, mapping.version + 1);
        assert_eq!(superseded.updated_by, successor_author);
    }
}
