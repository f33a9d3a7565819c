//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use proptest::prelude::*;

/// Strategy for generating Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::NGN),
        Just(Currency::GHS),
        Just(Currency::KES),
        Just(Currency::ZAR),
        Just(Currency::AUD),
        Just(Currency::CAD),
    ]
}

/// Strategy for generating positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating positive Money values
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating positive USD Money values
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::USD))
}

/// Strategy for generating accounting dates within 2024
pub fn entry_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=12u32, 1u32..=28u32).prop_map(|(month, day)| {
        NaiveDate::from_ymd_opt(2024, month, day).expect("day <= 28 is valid in every month")
    })
}
