//! HTTP API Layer
//!
//! This crate provides the REST API for the congregation ledger using
//! Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each domain
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses; optimistic-lock
//!   conflicts carry the authoritative version, reconciliation
//!   mismatches carry the computed difference
//!
//! Authentication and authorization are out of scope for this service;
//! the caller names its organisation/branch scope on each request.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState, config::ApiConfig};
//!
//! let app = create_router(AppState::new(ApiConfig::default()));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_funds::FundMappingService;
use domain_ledger::{AccountRegistry, JournalService, TrialBalanceCalculator};
use domain_reconciliation::ReconciliationService;
use infra_store::{
    InMemoryFundStore, InMemoryLedgerStore, InMemoryReconciliationStore, LedgerLineSource,
};

use crate::config::ApiConfig;
use crate::handlers::{accounts, entries, funds, health, reconciliation};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub accounts: Arc<AccountRegistry<InMemoryLedgerStore>>,
    pub journal: Arc<JournalService<InMemoryLedgerStore>>,
    pub trial_balance: Arc<TrialBalanceCalculator<InMemoryLedgerStore>>,
    pub fund_store: Arc<InMemoryFundStore>,
    pub funds: Arc<FundMappingService<InMemoryFundStore>>,
    pub reconciliation: Arc<
        ReconciliationService<InMemoryReconciliationStore, LedgerLineSource<InMemoryLedgerStore>>,
    >,
}

impl AppState {
    /// Builds the full service graph over fresh in-memory stores
    pub fn new(config: ApiConfig) -> Self {
        let ledger_store = Arc::new(InMemoryLedgerStore::new());
        let fund_store = Arc::new(InMemoryFundStore::new());
        let session_store = Arc::new(InMemoryReconciliationStore::new());
        let line_source = Arc::new(LedgerLineSource::new(ledger_store.clone()));

        Self {
            config,
            accounts: Arc::new(AccountRegistry::new(ledger_store.clone())),
            journal: Arc::new(JournalService::new(ledger_store.clone())),
            trial_balance: Arc::new(TrialBalanceCalculator::new(ledger_store)),
            funds: Arc::new(FundMappingService::new(fund_store.clone())),
            fund_store,
            reconciliation: Arc::new(ReconciliationService::new(session_store, line_source)),
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let account_routes = Router::new()
        .route("/", post(accounts::create_account).get(accounts::list_accounts))
        .route("/:id", get(accounts::get_account))
        .route("/:id/deactivate", post(accounts::deactivate_account));

    let entry_routes = Router::new()
        .route("/", post(entries::create_entry))
        .route("/:id", get(entries::get_entry))
        .route("/:id/post", post(entries::post_entry))
        .route("/:id/void", post(entries::void_entry))
        .route("/:id/reverse", post(entries::reverse_entry));

    let fund_routes = Router::new()
        .route("/", post(funds::create_fund).get(funds::list_funds));

    let contribution_type_routes = Router::new().route(
        "/",
        post(funds::create_contribution_type).get(funds::list_contribution_types),
    );

    let mapping_routes = Router::new()
        .route("/", post(funds::create_mapping).get(funds::resolve_mapping))
        .route("/defaults", post(funds::create_defaults));

    let reconciliation_routes = Router::new()
        .route(
            "/",
            post(reconciliation::start_session).get(reconciliation::list_sessions),
        )
        .route("/:id", get(reconciliation::get_session))
        .route("/:id/toggle", post(reconciliation::toggle_cleared))
        .route("/:id/save", post(reconciliation::save_session));

    let api_routes = Router::new()
        .nest("/accounts", account_routes)
        .nest("/journal-entries", entry_routes)
        .route("/trial-balance", get(entries::trial_balance))
        .nest("/funds", fund_routes)
        .nest("/contribution-types", contribution_type_routes)
        .nest("/fund-mappings", mapping_routes)
        .route("/contributions", post(funds::create_contribution))
        .nest("/reconciliations", reconciliation_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
