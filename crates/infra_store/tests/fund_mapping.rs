//! Fund mapping resolution and seeding against the in-memory fund store

use std::sync::Arc;

use core_kernel::{Currency, Money, Scope};
use domain_funds::{
    ContributionEvent, FundError, FundMappingService, FundStore, SkipReason,
};
use infra_store::InMemoryFundStore;
use rust_decimal_macros::dec;
use test_utils::{contribution_type, fund_with_revenue_account, IdFixtures, ScopeFixtures};

struct Setup {
    store: Arc<InMemoryFundStore>,
    service: FundMappingService<InMemoryFundStore>,
}

fn setup() -> Setup {
    let store = Arc::new(InMemoryFundStore::new());
    let service = FundMappingService::new(store.clone());
    Setup { store, service }
}

async fn seed_pair(
    store: &InMemoryFundStore,
    type_name: &str,
    fund_name: &str,
    code: &str,
    scope: Scope,
) -> (domain_funds::ContributionType, domain_funds::Fund) {
    let ct = store
        .insert_contribution_type(contribution_type(type_name, scope))
        .await
        .unwrap();
    let (fund, _account) = fund_with_revenue_account(fund_name, code, scope);
    let fund = store.insert_fund(fund).await.unwrap();
    (ct, fund)
}

#[tokio::test]
async fn test_create_and_resolve_mapping() {
    let Setup { store, service } = setup();
    let scope = ScopeFixtures::organisation();
    let (tithe_type, tithe_fund) = seed_pair(&store, "Tithe", "Tithe Fund", "4000", scope).await;

    let mapping = service
        .create_or_update(tithe_type.id, tithe_fund.id, scope, ScopeFixtures::operator())
        .await
        .unwrap();
    assert!(mapping.is_active);
    assert_eq!(mapping.version, 1);

    let resolved = service.resolve(tithe_type.id, scope).await.unwrap();
    assert_eq!(resolved.fund_id, tithe_fund.id);
}

#[tokio::test]
async fn test_branch_mapping_outranks_organisation() {
    let Setup { store, service } = setup();
    let org = ScopeFixtures::organisation();
    let branch = ScopeFixtures::branch();

    let (tithe_type, org_fund) = seed_pair(&store, "Tithe", "Tithe Fund", "4000", org).await;
    let (branch_fund, _account) = fund_with_revenue_account("Branch Tithe Fund", "4001", branch);
    let branch_fund = store.insert_fund(branch_fund).await.unwrap();

    service
        .create_or_update(tithe_type.id, org_fund.id, org, ScopeFixtures::operator())
        .await
        .unwrap();
    service
        .create_or_update(tithe_type.id, branch_fund.id, branch, ScopeFixtures::operator())
        .await
        .unwrap();

    // Branch caller gets the branch routing
    let resolved = service.resolve(tithe_type.id, branch).await.unwrap();
    assert_eq!(resolved.fund_id, branch_fund.id);

    // Organisation caller still gets the organisation routing
    let resolved = service.resolve(tithe_type.id, org).await.unwrap();
    assert_eq!(resolved.fund_id, org_fund.id);
}

#[tokio::test]
async fn test_branch_falls_back_to_organisation_mapping() {
    let Setup { store, service } = setup();
    let org = ScopeFixtures::organisation();
    let (tithe_type, org_fund) = seed_pair(&store, "Tithe", "Tithe Fund", "4000", org).await;

    service
        .create_or_update(tithe_type.id, org_fund.id, org, ScopeFixtures::operator())
        .await
        .unwrap();

    let resolved = service
        .resolve(tithe_type.id, ScopeFixtures::branch())
        .await
        .unwrap();
    assert_eq!(resolved.fund_id, org_fund.id);
}

#[tokio::test]
async fn test_remap_supersedes_and_keeps_history() {
    let Setup { store, service } = setup();
    let scope = ScopeFixtures::organisation();
    let (tithe_type, first_fund) = seed_pair(&store, "Tithe", "Tithe Fund", "4000", scope).await;
    let (second_fund, _account) = fund_with_revenue_account("Building Fund", "4500", scope);
    let second_fund = store.insert_fund(second_fund).await.unwrap();

    let first = service
        .create_or_update(tithe_type.id, first_fund.id, scope, ScopeFixtures::operator())
        .await
        .unwrap();
    let second = service
        .create_or_update(tithe_type.id, second_fund.id, scope, ScopeFixtures::operator())
        .await
        .unwrap();

    // New active routing, predecessor deactivated but retained
    let resolved = service.resolve(tithe_type.id, scope).await.unwrap();
    assert_eq!(resolved.id, second.id);

    let history = store.mappings(scope).await.unwrap();
    assert_eq!(history.len(), 2);
    let predecessor = history.iter().find(|m| m.id == first.id).unwrap();
    assert!(!predecessor.is_active);
    assert_eq!(predecessor.version, first.version + 1);
}

#[tokio::test]
async fn test_concurrent_remap_loses_with_conflict() {
    let Setup { store, service } = setup();
    let scope = ScopeFixtures::organisation();
    let (tithe_type, fund) = seed_pair(&store, "Tithe", "Tithe Fund", "4000", scope).await;

    // A mapping appears after our (simulated) stale observation of None
    let existing = domain_funds::FundMapping::new(
        tithe_type.id,
        fund.id,
        scope,
        ScopeFixtures::operator(),
    );
    store.supersede_mapping(existing, None).await.unwrap();

    let late = domain_funds::FundMapping::new(
        tithe_type.id,
        fund.id,
        scope,
        ScopeFixtures::operator(),
    );
    let result = store.supersede_mapping(late, None).await;
    assert!(matches!(result, Err(FundError::Conflict(_))));
}

#[tokio::test]
async fn test_create_defaults_seeds_and_reports_skips() {
    let Setup { store, service } = setup();
    let scope = ScopeFixtures::organisation();

    // Tithe and Offering fully configured; Pledge has a type but no
    // fund; Special Contribution and Donation are absent entirely
    seed_pair(&store, "Tithe", "Tithe Fund", "4000", scope).await;
    seed_pair(&store, "Offering", "Offering", "4100", scope).await;
    store
        .insert_contribution_type(contribution_type("Pledge", scope))
        .await
        .unwrap();

    let report = service
        .create_defaults(scope, ScopeFixtures::operator())
        .await
        .unwrap();

    assert_eq!(report.created.len(), 2);
    assert!(report
        .skipped
        .contains(&("Pledge".to_string(), SkipReason::NoMatchingFund)));
    assert!(report
        .skipped
        .contains(&("Special Contribution".to_string(), SkipReason::NoContributionType)));
    assert!(report
        .skipped
        .contains(&("Donation".to_string(), SkipReason::NoContributionType)));

    // A second run changes nothing: the seeded types are now mapped
    let rerun = service
        .create_defaults(scope, ScopeFixtures::operator())
        .await
        .unwrap();
    assert!(rerun.created.is_empty());
    assert!(rerun
        .skipped
        .contains(&("Tithe".to_string(), SkipReason::AlreadyMapped)));
}

#[tokio::test]
async fn test_contribution_posting_routes_to_fund_revenue() {
    let Setup { store, service } = setup();
    let scope = ScopeFixtures::organisation();
    let (tithe_type, tithe_fund) = seed_pair(&store, "Tithe", "Tithe Fund", "4000", scope).await;

    service
        .create_or_update(tithe_type.id, tithe_fund.id, scope, ScopeFixtures::operator())
        .await
        .unwrap();

    let cash_account = IdFixtures::account_id();
    let event = ContributionEvent {
        contribution_type_id: tithe_type.id,
        amount: Money::new(dec!(150.00), Currency::USD),
        scope,
    };

    let posting = service
        .contribution_posting(&event, cash_account)
        .await
        .unwrap();
    assert_eq!(posting.debit_account_id, cash_account);
    assert_eq!(posting.credit_account_id, tithe_fund.revenue_account_id);
    assert_eq!(posting.amount, event.amount);
}

#[tokio::test]
async fn test_unmapped_type_does_not_resolve() {
    let Setup { store, service } = setup();
    let scope = ScopeFixtures::organisation();
    let ct = store
        .insert_contribution_type(contribution_type("Offering", scope))
        .await
        .unwrap();

    let result = service.resolve(ct.id, scope).await;
    assert!(matches!(result, Err(FundError::NotFound(_))));
}
