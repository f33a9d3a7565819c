//! Storage port for the fund domain

use async_trait::async_trait;

use core_kernel::{ContributionTypeId, FundId, FundMappingId, Scope};

use crate::contribution_type::ContributionType;
use crate::error::FundError;
use crate::fund::Fund;
use crate::mapping::FundMapping;

/// Storage port for funds, contribution types, and mappings
///
/// # Contract
///
/// `supersede_mapping` is the single atomic operation enforcing the
/// one-active-mapping-per-(type, scope) invariant: inside one critical
/// section it compares the currently active mapping against what the
/// caller observed (`observed` is the predecessor's id and version, or
/// `None` when the caller saw no active mapping), deactivates the
/// predecessor, and inserts the successor. On any discrepancy it
/// returns `FundError::Conflict` and changes nothing.
#[async_trait]
pub trait FundStore: Send + Sync + 'static {
    /// Persists a new fund
    async fn insert_fund(&self, fund: Fund) -> Result<Fund, FundError>;

    /// Fetches a fund by id
    async fn fund(&self, id: FundId) -> Result<Option<Fund>, FundError>;

    /// Lists funds visible to the caller scope
    async fn funds(&self, caller: Scope) -> Result<Vec<Fund>, FundError>;

    /// Persists a new contribution type
    async fn insert_contribution_type(
        &self,
        contribution_type: ContributionType,
    ) -> Result<ContributionType, FundError>;

    /// Fetches a contribution type by id
    async fn contribution_type(
        &self,
        id: ContributionTypeId,
    ) -> Result<Option<ContributionType>, FundError>;

    /// Lists contribution types visible to the caller scope
    async fn contribution_types(&self, caller: Scope) -> Result<Vec<ContributionType>, FundError>;

    /// Returns the active mapping for the exact scope, if any
    async fn active_mapping(
        &self,
        contribution_type_id: ContributionTypeId,
        scope: Scope,
    ) -> Result<Option<FundMapping>, FundError>;

    /// Lists all mappings (active and superseded) visible to the caller
    /// scope, newest first
    async fn mappings(&self, caller: Scope) -> Result<Vec<FundMapping>, FundError>;

    /// Atomically replaces the active mapping for a scope+type
    async fn supersede_mapping(
        &self,
        successor: FundMapping,
        observed: Option<(FundMappingId, u32)>,
    ) -> Result<FundMapping, FundError>;
}
