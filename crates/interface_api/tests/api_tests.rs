//! API-level tests over the full in-memory service graph

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use interface_api::{config::ApiConfig, create_router, AppState};

fn test_server() -> TestServer {
    let state = AppState::new(ApiConfig::default());
    TestServer::new(create_router(state)).expect("router must build")
}

const ORG: &str = "550e8400-e29b-41d4-a716-446655440010";
const OPERATOR: &str = "550e8400-e29b-41d4-a716-446655440020";

async fn create_account(server: &TestServer, code: &str, name: &str, account_type: &str) -> Value {
    let response = server
        .post("/api/v1/accounts")
        .json(&json!({
            "code": code,
            "name": name,
            "account_type": account_type,
            "organisation_id": ORG,
        }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

async fn create_entry(server: &TestServer, bank: &Value, revenue: &Value, amount: &str) -> Value {
    let response = server
        .post("/api/v1/journal-entries")
        .json(&json!({
            "entry_date": "2024-03-10",
            "memo": "Sunday offering",
            "created_by": OPERATOR,
            "organisation_id": ORG,
            "lines": [
                { "account_id": bank["id"], "side": "debit", "amount": amount },
                { "account_id": revenue["id"], "side": "credit", "amount": amount },
            ],
        }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

#[tokio::test]
async fn test_health_endpoints() {
    let server = test_server();

    server.get("/health").await.assert_status_ok();
    server.get("/health/ready").await.assert_status_ok();
}

#[tokio::test]
async fn test_account_creation_and_listing() {
    let server = test_server();

    create_account(&server, "1100", "Main Bank Account", "Asset").await;
    create_account(&server, "4000", "Tithe Income", "Revenue").await;

    let response = server
        .get("/api/v1/accounts")
        .add_query_param("organisation_id", ORG)
        .await;
    response.assert_status_ok();
    let accounts = response.json::<Vec<Value>>();
    assert_eq!(accounts.len(), 2);
    // Chart order by code
    assert_eq!(accounts[0]["code"], "1100");
    assert_eq!(accounts[1]["code"], "4000");
}

#[tokio::test]
async fn test_unbalanced_entry_rejected_as_validation() {
    let server = test_server();
    let bank = create_account(&server, "1100", "Main Bank Account", "Asset").await;
    let revenue = create_account(&server, "4000", "Tithe Income", "Revenue").await;

    let response = server
        .post("/api/v1/journal-entries")
        .json(&json!({
            "entry_date": "2024-03-10",
            "memo": "Broken",
            "created_by": OPERATOR,
            "organisation_id": ORG,
            "lines": [
                { "account_id": bank["id"], "side": "debit", "amount": "100.00" },
                { "account_id": revenue["id"], "side": "credit", "amount": "90.00" },
            ],
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_entry_lifecycle_and_conflict_body() {
    let server = test_server();
    let bank = create_account(&server, "1100", "Main Bank Account", "Asset").await;
    let revenue = create_account(&server, "4000", "Tithe Income", "Revenue").await;

    let entry = create_entry(&server, &bank, &revenue, "250.00").await;
    assert_eq!(entry["status"], "draft");
    assert_eq!(entry["version"], 1);
    let entry_url = format!("/api/v1/journal-entries/{}", entry["id"].as_str().unwrap());

    // Post with the observed version
    let response = server
        .post(&format!("{entry_url}/post"))
        .json(&json!({ "expected_version": 1 }))
        .await;
    response.assert_status_ok();
    let posted = response.json::<Value>();
    assert_eq!(posted["status"], "posted");
    assert_eq!(posted["version"], 2);

    // Replaying the stale version conflicts, with the authoritative
    // version in the body
    let response = server
        .post(&format!("{entry_url}/post"))
        .json(&json!({ "expected_version": 1 }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["current_version"], 2);
}

#[tokio::test]
async fn test_reverse_endpoint_links_pair() {
    let server = test_server();
    let bank = create_account(&server, "1100", "Main Bank Account", "Asset").await;
    let revenue = create_account(&server, "4000", "Tithe Income", "Revenue").await;

    let entry = create_entry(&server, &bank, &revenue, "100.00").await;
    let entry_url = format!("/api/v1/journal-entries/{}", entry["id"].as_str().unwrap());
    server
        .post(&format!("{entry_url}/post"))
        .json(&json!({ "expected_version": 1 }))
        .await
        .assert_status_ok();

    let response = server
        .post(&format!("{entry_url}/reverse"))
        .json(&json!({ "reversal_date": "2024-03-31", "created_by": OPERATOR }))
        .await;
    response.assert_status_ok();
    let pair = response.json::<Value>();
    assert_eq!(pair["original"]["reversed_by"], pair["reversal"]["id"]);
    assert_eq!(pair["reversal"]["reversal_of"], pair["original"]["id"]);
    assert_eq!(pair["reversal"]["status"], "posted");
}

#[tokio::test]
async fn test_trial_balance_query() {
    let server = test_server();
    let bank = create_account(&server, "1100", "Main Bank Account", "Asset").await;
    let revenue = create_account(&server, "4000", "Tithe Income", "Revenue").await;

    let entry = create_entry(&server, &bank, &revenue, "300.00").await;
    let entry_url = format!("/api/v1/journal-entries/{}", entry["id"].as_str().unwrap());
    server
        .post(&format!("{entry_url}/post"))
        .json(&json!({ "expected_version": 1 }))
        .await
        .assert_status_ok();

    let response = server
        .get("/api/v1/trial-balance")
        .add_query_param("fiscal_year", "2024")
        .add_query_param("period", "3")
        .add_query_param("organisation_id", ORG)
        .await;
    response.assert_status_ok();
    let report = response.json::<Value>();
    assert_eq!(report["is_balanced"], true);
    assert_eq!(report["rows"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_contribution_intake_posts_entry() {
    let server = test_server();
    let bank = create_account(&server, "1100", "Main Bank Account", "Asset").await;
    let revenue = create_account(&server, "4000", "Tithe Income", "Revenue").await;

    let response = server
        .post("/api/v1/contribution-types")
        .json(&json!({ "name": "Tithe", "organisation_id": ORG }))
        .await;
    response.assert_status_ok();
    let tithe_type = response.json::<Value>();

    let response = server
        .post("/api/v1/funds")
        .json(&json!({
            "name": "Tithe Fund",
            "revenue_account_id": revenue["id"],
            "organisation_id": ORG,
        }))
        .await;
    response.assert_status_ok();
    let fund = response.json::<Value>();

    let response = server
        .post("/api/v1/fund-mappings")
        .json(&json!({
            "contribution_type_id": tithe_type["id"],
            "fund_id": fund["id"],
            "organisation_id": ORG,
            "actor": OPERATOR,
        }))
        .await;
    response.assert_status_ok();

    let response = server
        .post("/api/v1/contributions")
        .json(&json!({
            "contribution_type_id": tithe_type["id"],
            "amount": "150.00",
            "cash_account_id": bank["id"],
            "entry_date": "2024-03-17",
            "created_by": OPERATOR,
            "organisation_id": ORG,
        }))
        .await;
    response.assert_status_ok();
    let entry = response.json::<Value>();
    assert_eq!(entry["status"], "posted");
    assert_eq!(entry["lines"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unmapped_contribution_is_not_found() {
    let server = test_server();
    let bank = create_account(&server, "1100", "Main Bank Account", "Asset").await;

    let response = server
        .post("/api/v1/contribution-types")
        .json(&json!({ "name": "Offering", "organisation_id": ORG }))
        .await;
    let offering_type = response.json::<Value>();

    let response = server
        .post("/api/v1/contributions")
        .json(&json!({
            "contribution_type_id": offering_type["id"],
            "amount": "25.00",
            "cash_account_id": bank["id"],
            "entry_date": "2024-03-17",
            "created_by": OPERATOR,
            "organisation_id": ORG,
        }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reconciliation_mismatch_body_carries_difference() {
    let server = test_server();
    let bank = create_account(&server, "1100", "Main Bank Account", "Asset").await;
    let revenue = create_account(&server, "4000", "Tithe Income", "Revenue").await;

    let entry = create_entry(&server, &bank, &revenue, "500.00").await;
    let entry_url = format!("/api/v1/journal-entries/{}", entry["id"].as_str().unwrap());
    server
        .post(&format!("{entry_url}/post"))
        .json(&json!({ "expected_version": 1 }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/v1/reconciliations")
        .json(&json!({
            "account_id": bank["id"],
            "reconciliation_date": "2024-03-31",
        }))
        .await;
    response.assert_status_ok();
    let session = response.json::<Value>();
    let session_url = format!(
        "/api/v1/reconciliations/{}",
        session["id"].as_str().unwrap()
    );
    let line_id = session["candidates"][0]["line_id"].clone();

    server
        .post(&format!("{session_url}/toggle"))
        .json(&json!({ "line_id": line_id }))
        .await
        .assert_status_ok();

    // Statement short by 10
    let response = server
        .post(&format!("{session_url}/save"))
        .json(&json!({ "bank_statement_balance": "490.00" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "reconciliation_mismatch");
    assert_eq!(body["difference"]["amount"], "10.00");

    // Corrected statement reconciles
    let response = server
        .post(&format!("{session_url}/save"))
        .json(&json!({ "bank_statement_balance": "500.00" }))
        .await;
    response.assert_status_ok();
    let saved = response.json::<Value>();
    assert_eq!(saved["status"], "reconciled");
}
