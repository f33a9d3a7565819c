//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for common entities across the ledger system.
//! Fixtures are consistent and predictable so tests stay readable.

use chrono::NaiveDate;
use core_kernel::{
    AccountId, BranchId, Currency, FundMappingId, JournalEntryId, Money, OperatorId,
    OrganisationId, Scope,
};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use uuid::Uuid;

static ORGANISATION: Lazy<OrganisationId> = Lazy::new(|| {
    OrganisationId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440010").unwrap())
});
static BRANCH: Lazy<BranchId> = Lazy::new(|| {
    BranchId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440011").unwrap())
});
static OTHER_BRANCH: Lazy<BranchId> = Lazy::new(|| {
    BranchId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440012").unwrap())
});
static OPERATOR: Lazy<OperatorId> = Lazy::new(|| {
    OperatorId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440020").unwrap())
});

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard USD amount
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// A typical Sunday offering amount
    pub fn usd_offering() -> Money {
        Money::new(dec!(250.00), Currency::USD)
    }

    /// A typical monthly tithe amount
    pub fn usd_tithe() -> Money {
        Money::new(dec!(500.00), Currency::USD)
    }

    /// Zero USD
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// A EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }

    /// One cent, the reconciliation tolerance
    pub fn usd_one_cent() -> Money {
        Money::one_minor_unit(Currency::USD)
    }
}

/// Fixture for scope and date test data
pub struct ScopeFixtures;

impl ScopeFixtures {
    /// A deterministic organisation-wide scope
    pub fn organisation() -> Scope {
        Scope::organisation(Self::organisation_id())
    }

    /// A deterministic branch scope within the fixture organisation
    pub fn branch() -> Scope {
        Scope::branch(Self::organisation_id(), Self::branch_id())
    }

    /// A second branch of the same organisation
    pub fn other_branch() -> Scope {
        Scope::branch(Self::organisation_id(), *OTHER_BRANCH)
    }

    /// The fixture organisation id
    pub fn organisation_id() -> OrganisationId {
        *ORGANISATION
    }

    /// The fixture branch id
    pub fn branch_id() -> BranchId {
        *BRANCH
    }

    /// A deterministic operator
    pub fn operator() -> OperatorId {
        *OPERATOR
    }

    /// A mid-month accounting date (Mar 15, 2024)
    pub fn entry_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    /// The end of the fixture month (Mar 31, 2024)
    pub fn month_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// A deterministic account id
    pub fn account_id() -> AccountId {
        AccountId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// A deterministic journal entry id
    pub fn entry_id() -> JournalEntryId {
        JournalEntryId::from_uuid(
            Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap(),
        )
    }

    /// A deterministic fund mapping id
    pub fn mapping_id() -> FundMappingId {
        FundMappingId::from_uuid(
            Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap(),
        )
    }
}
