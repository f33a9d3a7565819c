//! In-memory adapter for the fund store port

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{ContributionTypeId, FundId, FundMappingId, Scope};
use domain_funds::{ContributionType, Fund, FundError, FundMapping, FundStore};

#[derive(Default)]
struct FundState {
    funds: HashMap<FundId, Fund>,
    contribution_types: HashMap<ContributionTypeId, ContributionType>,
    mappings: HashMap<FundMappingId, FundMapping>,
}

impl FundState {
    fn active_mapping(
        &self,
        contribution_type_id: ContributionTypeId,
        scope: Scope,
    ) -> Option<&FundMapping> {
        self.mappings.values().find(|mapping| {
            mapping.is_active
                && mapping.contribution_type_id == contribution_type_id
                && mapping.scope == scope
        })
    }
}

/// In-memory fund store
///
/// One `RwLock` over all three maps lets `supersede_mapping` hold a
/// single write guard across its observe/deactivate/insert steps.
#[derive(Default)]
pub struct InMemoryFundStore {
    state: RwLock<FundState>,
}

impl InMemoryFundStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FundStore for InMemoryFundStore {
    async fn insert_fund(&self, fund: Fund) -> Result<Fund, FundError> {
        let mut state = self.state.write().await;
        debug!(fund_id = %fund.id, name = %fund.name, "Storing fund");
        state.funds.insert(fund.id, fund.clone());
        Ok(fund)
    }

    async fn fund(&self, id: FundId) -> Result<Option<Fund>, FundError> {
        let state = self.state.read().await;
        Ok(state.funds.get(&id).cloned())
    }

    async fn funds(&self, caller: Scope) -> Result<Vec<Fund>, FundError> {
        let state = self.state.read().await;
        let mut visible: Vec<Fund> = state
            .funds
            .values()
            .filter(|fund| fund.scope.visible_to(&caller))
            .cloned()
            .collect();
        visible.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(visible)
    }

    async fn insert_contribution_type(
        &self,
        contribution_type: ContributionType,
    ) -> Result<ContributionType, FundError> {
        let mut state = self.state.write().await;
        state
            .contribution_types
            .insert(contribution_type.id, contribution_type.clone());
        Ok(contribution_type)
    }

    async fn contribution_type(
        &self,
        id: ContributionTypeId,
    ) -> Result<Option<ContributionType>, FundError> {
        let state = self.state.read().await;
        Ok(state.contribution_types.get(&id).cloned())
    }

    async fn contribution_types(
        &self,
        caller: Scope,
    ) -> Result<Vec<ContributionType>, FundError> {
        let state = self.state.read().await;
        let mut visible: Vec<ContributionType> = state
            .contribution_types
            .values()
            .filter(|ct| ct.scope.visible_to(&caller))
            .cloned()
            .collect();
        visible.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(visible)
    }

    async fn active_mapping(
        &self,
        contribution_type_id: ContributionTypeId,
        scope: Scope,
    ) -> Result<Option<FundMapping>, FundError> {
        let state = self.state.read().await;
        Ok(state.active_mapping(contribution_type_id, scope).cloned())
    }

    async fn mappings(&self, caller: Scope) -> Result<Vec<FundMapping>, FundError> {
        let state = self.state.read().await;
        let mut visible: Vec<FundMapping> = state
            .mappings
            .values()
            .filter(|mapping| mapping.scope.visible_to(&caller))
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(visible)
    }

    async fn supersede_mapping(
        &self,
        successor: FundMapping,
        observed: Option<(FundMappingId, u32)>,
    ) -> Result<FundMapping, FundError> {
        let mut state = self.state.write().await;

        let current = state
            .active_mapping(successor.contribution_type_id, successor.scope)
            .map(|mapping| (mapping.id, mapping.version));

        if current != observed {
            return Err(FundError::Conflict(format!(
                "active mapping for contribution type {} in {} changed concurrently",
                successor.contribution_type_id, successor.scope
            )));
        }

        if let Some((predecessor_id, _)) = observed {
            let actor = successor.updated_by;
            let predecessor = state
                .mappings
                .get(&predecessor_id)
                .ok_or_else(|| FundError::not_found(format!("mapping {predecessor_id}")))?;
            let superseded = predecessor.deactivated(actor);
            state.mappings.insert(predecessor_id, superseded);
        }

        debug!(mapping_id = %successor.id, "Storing fund mapping");
        state.mappings.insert(successor.id, successor.clone());
        Ok(successor)
    }
}
