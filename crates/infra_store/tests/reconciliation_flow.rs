//! End-to-end reconciliation against the in-memory stores

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{AccountId, Currency, Money};
use domain_ledger::{AccountRegistry, CongregationChartOfAccounts, JournalService};
use domain_reconciliation::{
    ReconciliationError, ReconciliationService, ReconciliationStore, SessionStatus,
};
use infra_store::{InMemoryLedgerStore, InMemoryReconciliationStore, LedgerLineSource};
use rust_decimal_macros::dec;
use test_utils::{EntryDraftBuilder, ScopeFixtures};

struct Setup {
    journal: JournalService<InMemoryLedgerStore>,
    recon: ReconciliationService<InMemoryReconciliationStore, LedgerLineSource<InMemoryLedgerStore>>,
    recon_store: Arc<InMemoryReconciliationStore>,
    bank: AccountId,
    tithe: AccountId,
    expense: AccountId,
}

async fn setup() -> Setup {
    let ledger_store = Arc::new(InMemoryLedgerStore::new());
    let registry = AccountRegistry::new(ledger_store.clone());

    let mut bank = None;
    let mut tithe = None;
    let mut expense = None;
    for account in
        CongregationChartOfAccounts::create_standard_accounts(ScopeFixtures::organisation())
    {
        let created = registry.create(account).await.unwrap();
        match created.code.as_str() {
            "1100" => bank = Some(created.id),
            "4000" => tithe = Some(created.id),
            "5000" => expense = Some(created.id),
            _ => {}
        }
    }

    let session_store = Arc::new(InMemoryReconciliationStore::new());
    let line_source = Arc::new(LedgerLineSource::new(ledger_store.clone()));

    Setup {
        journal: JournalService::new(ledger_store),
        recon: ReconciliationService::new(session_store.clone(), line_source),
        recon_store: session_store,
        bank: bank.unwrap(),
        tithe: tithe.unwrap(),
        expense: expense.unwrap(),
    }
}

fn usd(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

async fn post_entry(
    setup: &Setup,
    debit: AccountId,
    credit: AccountId,
    amount: Money,
    date: NaiveDate,
) {
    let created = setup
        .journal
        .create(
            EntryDraftBuilder::new()
                .debit_account(debit)
                .credit_account(credit)
                .amount(amount)
                .entry_date(date)
                .build(),
        )
        .await
        .unwrap();
    setup
        .journal
        .post(created.id, created.version)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_matching_statement_reconciles() {
    let setup = setup().await;
    let march = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();

    // Opening balance 500, then a 120 deposit and a 20 payment
    post_entry(&setup, setup.bank, setup.tithe, usd(dec!(500)), march(1)).await;
    post_entry(&setup, setup.bank, setup.tithe, usd(dec!(120)), march(10)).await;
    post_entry(&setup, setup.expense, setup.bank, usd(dec!(20)), march(20)).await;

    let session = setup
        .recon
        .start_session(setup.bank, march(31), Currency::USD)
        .await
        .unwrap();
    // Nothing reconciled yet, so everything is a candidate
    assert_eq!(session.book_balance, usd(dec!(0)));
    assert_eq!(session.candidates.len(), 3);

    for candidate in session.candidates.clone() {
        setup
            .recon
            .toggle_cleared(session.id, candidate.line_id)
            .await
            .unwrap();
    }

    let saved = setup
        .recon
        .save(session.id, usd(dec!(600)), Some("March statement".to_string()))
        .await
        .unwrap();
    assert_eq!(saved.status, SessionStatus::Reconciled);
    assert_eq!(saved.difference, usd(dec!(0)));
    assert!(saved.reconciled_at.is_some());
}

#[tokio::test]
async fn test_mismatch_persists_progress_and_reports_difference() {
    let setup = setup().await;
    let march = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();

    post_entry(&setup, setup.bank, setup.tithe, usd(dec!(500)), march(1)).await;
    post_entry(&setup, setup.bank, setup.tithe, usd(dec!(120)), march(10)).await;
    post_entry(&setup, setup.expense, setup.bank, usd(dec!(20)), march(20)).await;

    let session = setup
        .recon
        .start_session(setup.bank, march(31), Currency::USD)
        .await
        .unwrap();
    for candidate in session.candidates.clone() {
        setup
            .recon
            .toggle_cleared(session.id, candidate.line_id)
            .await
            .unwrap();
    }

    // Statement is short by 10
    let result = setup.recon.save(session.id, usd(dec!(590)), None).await;
    match result {
        Err(ReconciliationError::Mismatch { difference }) => {
            assert_eq!(difference, usd(dec!(10)));
        }
        other => panic!("expected mismatch, got {other:?}"),
    }

    // The failed save still recorded the statement balance and left the
    // session workable
    let stored = setup.recon.get(session.id).await.unwrap();
    assert_eq!(stored.status, SessionStatus::InProgress);
    assert_eq!(stored.bank_statement_balance, usd(dec!(590)));
    assert_eq!(stored.difference, usd(dec!(10)));
}

#[tokio::test]
async fn test_cleared_lines_never_reappear_as_candidates() {
    let setup = setup().await;
    let march = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
    let april = |day| NaiveDate::from_ymd_opt(2024, 4, day).unwrap();

    post_entry(&setup, setup.bank, setup.tithe, usd(dec!(300)), march(5)).await;

    // Reconcile March fully
    let march_session = setup
        .recon
        .start_session(setup.bank, march(31), Currency::USD)
        .await
        .unwrap();
    for candidate in march_session.candidates.clone() {
        setup
            .recon
            .toggle_cleared(march_session.id, candidate.line_id)
            .await
            .unwrap();
    }
    setup
        .recon
        .save(march_session.id, usd(dec!(300)), None)
        .await
        .unwrap();

    // April activity
    post_entry(&setup, setup.bank, setup.tithe, usd(dec!(50)), april(3)).await;

    let april_session = setup
        .recon
        .start_session(setup.bank, april(30), Currency::USD)
        .await
        .unwrap();

    // The reconciled March line rolls into the book balance and is no
    // longer a candidate
    assert_eq!(april_session.book_balance, usd(dec!(300)));
    assert_eq!(april_session.candidates.len(), 1);
    assert_eq!(april_session.candidates[0].debit, usd(dec!(50)));
}

#[tokio::test]
async fn test_reconciled_session_rejects_further_work() {
    let setup = setup().await;
    let march = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();

    post_entry(&setup, setup.bank, setup.tithe, usd(dec!(100)), march(5)).await;

    let session = setup
        .recon
        .start_session(setup.bank, march(31), Currency::USD)
        .await
        .unwrap();
    let line_id = session.candidates[0].line_id;
    setup
        .recon
        .toggle_cleared(session.id, line_id)
        .await
        .unwrap();
    setup
        .recon
        .save(session.id, usd(dec!(100)), None)
        .await
        .unwrap();

    let toggle = setup.recon.toggle_cleared(session.id, line_id).await;
    assert!(matches!(toggle, Err(ReconciliationError::InvalidState(_))));

    let resave = setup.recon.save(session.id, usd(dec!(100)), None).await;
    assert!(matches!(resave, Err(ReconciliationError::InvalidState(_))));
}

#[tokio::test]
async fn test_stale_session_write_conflicts() {
    let setup = setup().await;
    let march = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();

    post_entry(&setup, setup.bank, setup.tithe, usd(dec!(100)), march(5)).await;

    let session = setup
        .recon
        .start_session(setup.bank, march(31), Currency::USD)
        .await
        .unwrap();
    assert_eq!(session.version, 1);
    let line_id = session.candidates[0].line_id;

    // A second operator's copy, fetched before the first toggle lands
    let mut stale = session.clone();

    let toggled = setup
        .recon
        .toggle_cleared(session.id, line_id)
        .await
        .unwrap();
    assert_eq!(toggled.version, 2);

    stale.toggle_cleared(line_id).unwrap();
    let result = setup
        .recon_store
        .update_session(stale, session.version)
        .await;
    match result {
        Err(ReconciliationError::Conflict { expected, current, .. }) => {
            assert_eq!(expected, 1);
            assert_eq!(current, 2);
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    // The winning toggle is intact
    let stored = setup.recon.get(session.id).await.unwrap();
    assert!(stored.cleared_line_ids.contains(&line_id));
}

#[tokio::test]
async fn test_sessions_listed_most_recent_first() {
    let setup = setup().await;
    let march = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();

    post_entry(&setup, setup.bank, setup.tithe, usd(dec!(100)), march(5)).await;

    let first = setup
        .recon
        .start_session(setup.bank, march(15), Currency::USD)
        .await
        .unwrap();
    let second = setup
        .recon
        .start_session(setup.bank, march(31), Currency::USD)
        .await
        .unwrap();

    let sessions = setup.recon.sessions_for_account(setup.bank).await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id, second.id);
    assert_eq!(sessions[1].id, first.id);
}
