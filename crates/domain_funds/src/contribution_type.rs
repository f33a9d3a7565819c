//! Contribution types and the well-known catalog
//!
//! Contribution types label incoming gifts (tithe, offering, ...). The
//! well-known catalog drives default fund-mapping seeding: each entry is
//! paired with a conventionally named fund when `create_defaults` runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ContributionTypeId, Scope};

/// A contribution type configured for an organisation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionType {
    /// Unique identifier
    pub id: ContributionTypeId,
    /// Display name (e.g., "Tithe")
    pub name: String,
    /// Organisation/branch the type belongs to
    pub scope: Scope,
    /// Whether the type accepts new contributions
    pub is_active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl ContributionType {
    /// Creates a new active contribution type
    pub fn new(name: impl Into<String>, scope: Scope) -> Self {
        Self {
            id: ContributionTypeId::new_v7(),
            name: name.into(),
            scope,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// The catalog of contribution types that default seeding understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellKnownContributionType {
    Tithe,
    Offering,
    Pledge,
    SpecialContribution,
    Donation,
}

impl WellKnownContributionType {
    /// All catalog entries, in seeding order
    pub const ALL: [WellKnownContributionType; 5] = [
        WellKnownContributionType::Tithe,
        WellKnownContributionType::Offering,
        WellKnownContributionType::Pledge,
        WellKnownContributionType::SpecialContribution,
        WellKnownContributionType::Donation,
    ];

    /// Canonical display name, also used for fund name matching
    pub fn canonical_name(&self) -> &'static str {
        match self {
            WellKnownContributionType::Tithe => "Tithe",
            WellKnownContributionType::Offering => "Offering",
            WellKnownContributionType::Pledge => "Pledge",
            WellKnownContributionType::SpecialContribution => "Special Contribution",
            WellKnownContributionType::Donation => "Donation",
        }
    }

    /// Returns true if the configured type name refers to this catalog
    /// entry (case-insensitive)
    pub fn matches(&self, type_name: &str) -> bool {
        type_name.eq_ignore_ascii_case(self.canonical_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_complete() {
        assert_eq!(WellKnownContributionType::ALL.len(), 5);
    }

    #[test]
    fn test_case_insensitive_match() {
        assert!(WellKnownContributionType::Tithe.matches("tithe"));
        assert!(WellKnownContributionType::SpecialContribution.matches("special contribution"));
        assert!(!WellKnownContributionType::Offering.matches("tithe"));
    }
}
