//! Fund mapping resolution and seeding
//!
//! Resolution answers "which fund does this contribution type post to"
//! without the operator picking a fund by hand. Branch-scoped mappings
//! take precedence over organisation-wide ones; remapping appends rather
//! than overwrites.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use core_kernel::{ContributionTypeId, FundId, Money, OperatorId, Scope};

use crate::contribution_type::WellKnownContributionType;
use crate::error::FundError;
use crate::mapping::FundMapping;
use crate::store::FundStore;

/// Outcome of a `create_defaults` run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultSeedReport {
    /// Mappings created by this run
    pub created: Vec<FundMapping>,
    /// Catalog names skipped, with the reason
    pub skipped: Vec<(String, SkipReason)>,
}

/// Why a catalog entry was not seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The scope already has an active mapping for the type
    AlreadyMapped,
    /// No contribution type with the catalog name is configured
    NoContributionType,
    /// No fund name-matches the catalog entry
    NoMatchingFund,
    /// A concurrent writer seeded the type first
    LostRace,
}

/// A contribution event arriving from the intake boundary
#[derive(Debug, Clone)]
pub struct ContributionEvent {
    /// Type of the contribution
    pub contribution_type_id: ContributionTypeId,
    /// Gift amount
    pub amount: Money,
    /// Scope the contribution was received under
    pub scope: Scope,
}

/// The balanced pair of ledger postings for one contribution
///
/// The cash side is supplied by the caller (which bank/cash account took
/// the gift); the revenue side comes from the resolved fund.
#[derive(Debug, Clone)]
pub struct ContributionPosting {
    /// Account to debit (cash/bank)
    pub debit_account_id: core_kernel::AccountId,
    /// Account to credit (resolved fund's revenue account)
    pub credit_account_id: core_kernel::AccountId,
    /// Posting amount
    pub amount: Money,
    /// Suggested entry memo
    pub memo: String,
}

/// Service resolving contribution types to funds
pub struct FundMappingService<S> {
    store: Arc<S>,
}

impl<S: FundStore> FundMappingService<S> {
    /// Creates a new service over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolves the active mapping for a contribution type
    ///
    /// Looks up the most specific scope first: when the caller scope
    /// names a branch, a branch-level mapping wins over an
    /// organisation-level one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no active mapping exists at either scope
    #[instrument(skip(self), fields(scope = %scope))]
    pub async fn resolve(
        &self,
        contribution_type_id: ContributionTypeId,
        scope: Scope,
    ) -> Result<FundMapping, FundError> {
        if scope.is_branch_scoped() {
            if let Some(mapping) = self
                .store
                .active_mapping(contribution_type_id, scope)
                .await?
            {
                return Ok(mapping);
            }
        }

        let org_scope = Scope::organisation(scope.organisation_id);
        self.store
            .active_mapping(contribution_type_id, org_scope)
            .await?
            .ok_or_else(|| {
                FundError::not_found(format!(
                    "no active fund mapping for contribution type {contribution_type_id} in {scope}"
                ))
            })
    }

    /// Maps a contribution type to a fund, superseding any prior mapping
    ///
    /// The prior active mapping for the exact scope is deactivated, not
    /// deleted. Two operators racing for the same scope+type resolve to
    /// exactly one winner; the loser receives `Conflict` and must
    /// refetch.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the fund or contribution type is missing,
    ///   inactive, or not visible from the scope
    /// - `Conflict` when a concurrent writer changed the active mapping
    #[instrument(skip(self), fields(scope = %scope))]
    pub async fn create_or_update(
        &self,
        contribution_type_id: ContributionTypeId,
        fund_id: FundId,
        scope: Scope,
        actor: OperatorId,
    ) -> Result<FundMapping, FundError> {
        let fund = self
            .store
            .fund(fund_id)
            .await?
            .ok_or_else(|| FundError::not_found(format!("fund {fund_id}")))?;
        if !fund.is_active || !fund.scope.visible_to(&scope) {
            return Err(FundError::not_found(format!(
                "fund {} is inactive or out of scope",
                fund.name
            )));
        }

        let contribution_type = self
            .store
            .contribution_type(contribution_type_id)
            .await?
            .ok_or_else(|| {
                FundError::not_found(format!("contribution type {contribution_type_id}"))
            })?;
        if !contribution_type.is_active || !contribution_type.scope.visible_to(&scope) {
            return Err(FundError::not_found(format!(
                "contribution type {} is inactive or out of scope",
                contribution_type.name
            )));
        }

        let observed = self
            .store
            .active_mapping(contribution_type_id, scope)
            .await?
            .map(|current| (current.id, current.version));

        let successor = FundMapping::new(contribution_type_id, fund_id, scope, actor);
        let stored = self.store.supersede_mapping(successor, observed).await?;

        info!(
            mapping_id = %stored.id,
            fund = %fund.name,
            contribution_type = %contribution_type.name,
            superseded = observed.is_some(),
            "Fund mapping created"
        );
        Ok(stored)
    }

    /// Bulk-seeds mappings for the well-known contribution type catalog
    ///
    /// Pairs each catalog entry with an identically-named or best-match
    /// fund. Types that already carry an active mapping are skipped; an
    /// existing active mapping is never demoted. A catalog entry lost to
    /// a concurrent seeder is recorded as skipped rather than failing
    /// the run.
    #[instrument(skip(self), fields(scope = %scope))]
    pub async fn create_defaults(
        &self,
        scope: Scope,
        actor: OperatorId,
    ) -> Result<DefaultSeedReport, FundError> {
        let contribution_types = self.store.contribution_types(scope).await?;
        let funds = self.store.funds(scope).await?;

        let mut report = DefaultSeedReport {
            created: Vec::new(),
            skipped: Vec::new(),
        };

        for catalog_entry in WellKnownContributionType::ALL {
            let name = catalog_entry.canonical_name();

            let Some(contribution_type) = contribution_types
                .iter()
                .find(|ct| ct.is_active && catalog_entry.matches(&ct.name))
            else {
                report
                    .skipped
                    .push((name.to_string(), SkipReason::NoContributionType));
                continue;
            };

            if self
                .store
                .active_mapping(contribution_type.id, scope)
                .await?
                .is_some()
            {
                report
                    .skipped
                    .push((name.to_string(), SkipReason::AlreadyMapped));
                continue;
            }

            // Exact name match preferred, containment as fallback
            let matched_fund = funds
                .iter()
                .filter(|f| f.is_active)
                .find(|f| f.name.eq_ignore_ascii_case(name))
                .or_else(|| funds.iter().filter(|f| f.is_active).find(|f| f.matches_name(name)));

            let Some(fund) = matched_fund else {
                report
                    .skipped
                    .push((name.to_string(), SkipReason::NoMatchingFund));
                continue;
            };

            let mapping = FundMapping::new(contribution_type.id, fund.id, scope, actor);
            match self.store.supersede_mapping(mapping, None).await {
                Ok(stored) => report.created.push(stored),
                Err(FundError::Conflict(_)) => {
                    warn!(contribution_type = name, "Default seeding lost a race; skipping");
                    report.skipped.push((name.to_string(), SkipReason::LostRace));
                }
                Err(other) => return Err(other),
            }
        }

        info!(
            created = report.created.len(),
            skipped = report.skipped.len(),
            "Default fund mappings seeded"
        );
        Ok(report)
    }

    /// Translates a contribution event into its ledger posting pair
    ///
    /// Resolves the fund for the contribution type and returns the
    /// debit(cash)/credit(fund revenue) pair the ledger should persist.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no mapping resolves or the mapped fund is gone
    /// - `Validation` when the amount is not positive
    pub async fn contribution_posting(
        &self,
        event: &ContributionEvent,
        cash_account_id: core_kernel::AccountId,
    ) -> Result<ContributionPosting, FundError> {
        if !event.amount.is_positive() {
            return Err(FundError::validation(
                "contribution amount must be positive",
            ));
        }

        let mapping = self.resolve(event.contribution_type_id, event.scope).await?;
        let fund = self
            .store
            .fund(mapping.fund_id)
            .await?
            .ok_or_else(|| FundError::not_found(format!("fund {}", mapping.fund_id)))?;

        let contribution_type = self
            .store
            .contribution_type(event.contribution_type_id)
            .await?
            .ok_or_else(|| {
                FundError::not_found(format!(
                    "contribution type {}",
                    event.contribution_type_id
                ))
            })?;

        Ok(ContributionPosting {
            debit_account_id: cash_account_id,
            credit_account_id: fund.revenue_account_id,
            amount: event.amount,
            memo: format!("{} contribution to {}", contribution_type.name, fund.name),
        })
    }
}
