//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more
//! meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_ledger::entry::JournalEntry;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more
/// than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a journal entry satisfies the double-entry invariant
///
/// # Panics
///
/// Panics if total debits do not equal total credits, printing both sums
pub fn assert_entry_balanced(entry: &JournalEntry) {
    let debits = entry.total_debits().expect("entry debits must sum");
    let credits = entry.total_credits().expect("entry credits must sum");
    assert_eq!(
        debits, credits,
        "Entry {} is unbalanced: debits={}, credits={}",
        entry.id, debits, credits
    );
}
