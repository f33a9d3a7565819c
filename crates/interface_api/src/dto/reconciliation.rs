//! Reconciliation DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::{AccountId, JournalLineId};

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub account_id: AccountId,
    pub reconciliation_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ToggleClearedRequest {
    pub line_id: JournalLineId,
}

#[derive(Debug, Deserialize)]
pub struct SaveSessionRequest {
    pub bank_statement_balance: Decimal,
    pub notes: Option<String>,
}
