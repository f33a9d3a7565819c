//! Fund definition
//!
//! A fund is a named pot of designated money. For ledger purposes each
//! fund carries the revenue account that contribution income posts to.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use core_kernel::{AccountId, FundId, Scope};

/// A fund that contributions can be designated to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fund {
    /// Unique identifier
    pub id: FundId,
    /// Fund name (e.g., "Tithe", "Building Fund")
    pub name: String,
    /// Revenue account that contribution income to this fund credits
    pub revenue_account_id: AccountId,
    /// Organisation/branch the fund belongs to
    pub scope: Scope,
    /// Whether the fund accepts new contributions
    pub is_active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Fund {
    /// Creates a new active fund
    pub fn new(name: impl Into<String>, revenue_account_id: AccountId, scope: Scope) -> Self {
        Self {
            id: FundId::new_v7(),
            name: name.into(),
            revenue_account_id,
            scope,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Returns true if this fund's name matches the given contribution
    /// type name, by the seeding convention
    ///
    /// Exact case-insensitive match first; a fund whose name contains the
    /// type name (e.g., "Tithe Fund" for "Tithe") also qualifies.
    pub fn matches_name(&self, type_name: &str) -> bool {
        let own = self.name.to_lowercase();
        let wanted = type_name.to_lowercase();
        own == wanted || own.contains(&wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::OrganisationId;

    #[test]
    fn test_name_matching() {
        let scope = Scope::organisation(OrganisationId::new());
        let fund = Fund::new("Tithe Fund", AccountId::new(), scope);

        assert!(fund.matches_name("Tithe"));
        assert!(fund.matches_name("tithe"));
        assert!(!fund.matches_name("Offering"));
    }

    #[test]
    fn test_exact_match() {
        let scope = Scope::organisation(OrganisationId::new());
        let fund = Fund::new("Offering", AccountId::new(), scope);

        assert!(fund.matches_name("Offering"));
    }
}
