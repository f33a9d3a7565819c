//! Fund Domain - Contribution Routing
//!
//! This crate decides which fund a contribution posts to, so operators
//! never pick funds by hand at intake time:
//!
//! - `FundMapping` records route a contribution type to a fund per scope,
//!   append-only with at most one active record per (type, scope)
//! - branch-level mappings take precedence over organisation-level ones
//! - `create_defaults` bulk-seeds the well-known catalog (tithe,
//!   offering, pledge, special contribution, donation) against
//!   conventionally named funds
//! - contribution events translate to a balanced debit/credit pair for
//!   the ledger

pub mod contribution_type;
pub mod error;
pub mod fund;
pub mod mapping;
pub mod resolver;
pub mod store;

pub use contribution_type::{ContributionType, WellKnownContributionType};
pub use error::FundError;
pub use fund::Fund;
pub use mapping::FundMapping;
pub use resolver::{
    ContributionEvent, ContributionPosting, DefaultSeedReport, FundMappingService, SkipReason,
};
pub use store::FundStore;
