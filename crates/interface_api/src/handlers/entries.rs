//! Journal entry and trial balance handlers

use axum::extract::{Path, Query, State};
use axum::Json;

use core_kernel::{FiscalPeriod, JournalEntryId, Money, Scope};
use domain_ledger::entry::{JournalLine, NewJournalEntry};
use domain_ledger::{JournalEntry, ReversalPair, Side, TrialBalance};

use crate::dto::ledger::{
    CreateEntryRequest, ReverseRequest, TransitionRequest, TrialBalanceQuery,
};
use crate::error::ApiError;
use crate::AppState;

/// Creates a draft journal entry
pub async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<Json<JournalEntry>, ApiError> {
    let currency = state.config.base_currency;
    let mut draft = NewJournalEntry::new(
        request.scope.into(),
        request.entry_date,
        request.memo,
        request.created_by,
    );

    for line in request.lines {
        let amount = Money::new(line.amount, currency);
        let mut journal_line = match line.side {
            Side::Debit => JournalLine::debit(line.account_id, amount),
            Side::Credit => JournalLine::credit(line.account_id, amount),
        };
        if let Some(memo) = line.memo {
            journal_line = journal_line.with_memo(memo);
        }
        draft = draft.line(journal_line);
    }

    let created = state.journal.create(draft).await?;
    Ok(Json(created))
}

/// Gets a journal entry by id
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<JournalEntryId>,
) -> Result<Json<JournalEntry>, ApiError> {
    let entry = state.journal.get(id).await?;
    Ok(Json(entry))
}

/// Posts a draft entry
pub async fn post_entry(
    State(state): State<AppState>,
    Path(id): Path<JournalEntryId>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<JournalEntry>, ApiError> {
    let posted = state.journal.post(id, request.expected_version).await?;
    Ok(Json(posted))
}

/// Voids a posted entry
pub async fn void_entry(
    State(state): State<AppState>,
    Path(id): Path<JournalEntryId>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<JournalEntry>, ApiError> {
    let voided = state.journal.void(id, request.expected_version).await?;
    Ok(Json(voided))
}

/// Reverses a posted entry, returning the linked pair
pub async fn reverse_entry(
    State(state): State<AppState>,
    Path(id): Path<JournalEntryId>,
    Json(request): Json<ReverseRequest>,
) -> Result<Json<ReversalPairResponse>, ApiError> {
    let pair = state
        .journal
        .reverse(id, request.reversal_date, request.created_by)
        .await?;
    Ok(Json(pair.into()))
}

/// Serializable projection of a reversal pair
#[derive(Debug, serde::Serialize)]
pub struct ReversalPairResponse {
    pub original: JournalEntry,
    pub reversal: JournalEntry,
}

impl From<ReversalPair> for ReversalPairResponse {
    fn from(pair: ReversalPair) -> Self {
        Self {
            original: pair.original,
            reversal: pair.reversal,
        }
    }
}

/// Computes the trial balance for a scope and fiscal period
pub async fn trial_balance(
    State(state): State<AppState>,
    Query(query): Query<TrialBalanceQuery>,
) -> Result<Json<TrialBalance>, ApiError> {
    let period = FiscalPeriod::new(query.fiscal_year, query.period)
        .map_err(|err| ApiError::Validation(err.to_string()))?;
    let scope = match query.branch_id {
        Some(branch) => Scope::branch(query.organisation_id, branch),
        None => Scope::organisation(query.organisation_id),
    };

    let report = state
        .trial_balance
        .compute(scope, period, state.config.base_currency)
        .await?;
    Ok(Json(report))
}
