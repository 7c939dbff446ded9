//! Test utilities for nexora-core
//!
//! This module provides testing infrastructure including a mock REST API
//! server that speaks the same wire contract as the production backend, for
//! development and integration tests of the remote store.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::models::{Account, BankCard, NewBankCard, NewTransaction, Transaction, TransactionPatch};

/// Mock Nexora API server for testing and development
pub struct MockApiServer {
    addr: SocketAddr,
    state: Arc<Mutex<MockState>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

#[derive(Default)]
struct MockState {
    users: Vec<Account>,
    transactions: Vec<Transaction>,
    banks: Vec<BankCard>,
    /// token -> user id
    tokens: HashMap<String, String>,
}

type Shared = Arc<Mutex<MockState>>;

impl MockApiServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState::default()));

        let app = Router::new()
            .route("/auth/register", post(handle_register))
            .route("/auth/login", post(handle_login))
            .route("/transactions", get(handle_list_tx).post(handle_create_tx))
            .route(
                "/transactions/:id",
                put(handle_update_tx).delete(handle_delete_tx),
            )
            .route("/banks", get(handle_list_banks).post(handle_create_bank))
            .route(
                "/banks/:id",
                put(handle_update_bank).delete(handle_delete_bank),
            )
            .route("/users", get(handle_list_users))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of stored transactions (for assertions)
    pub fn transaction_count(&self) -> usize {
        self.state.lock().unwrap().transactions.len()
    }

    /// Number of registered accounts (for assertions)
    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Resolve the bearer token to a user id, mirroring the reference middleware
fn authed_user(state: &MockState, headers: &HeaderMap) -> Option<String> {
    let token = headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    state.tokens.get(token).cloned()
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Access denied"})),
    )
}

#[derive(Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    #[serde(default)]
    position: String,
}

async fn handle_register(
    State(state): State<Shared>,
    Json(req): Json<RegisterRequest>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    if state.users.iter().any(|u| u.email == req.email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Email already exists"})),
        );
    }

    let user = Account {
        id: Uuid::new_v4().to_string(),
        name: req.name,
        email: req.email,
        position: req.position,
        password: Some(req.password),
        created_at: Utc::now(),
    };
    state.users.push(user.clone());

    let token = format!("mock-token-{}", Uuid::new_v4());
    state.tokens.insert(token.clone(), user.id.clone());

    (
        StatusCode::CREATED,
        Json(json!({"user": user.without_credential(), "token": token})),
    )
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn handle_login(
    State(state): State<Shared>,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    let user = state
        .users
        .iter()
        .find(|u| u.email == req.email && u.password.as_deref() == Some(&req.password))
        .cloned();

    match user {
        Some(user) => {
            let token = format!("mock-token-{}", Uuid::new_v4());
            state.tokens.insert(token.clone(), user.id.clone());
            (
                StatusCode::OK,
                Json(json!({"user": user.without_credential(), "token": token})),
            )
        }
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid credentials"})),
        ),
    }
}

async fn handle_list_tx(
    State(state): State<Shared>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let state = state.lock().unwrap();
    if authed_user(&state, &headers).is_none() {
        return unauthorized();
    }

    // Every record regardless of the requesting identity, newest first
    let mut txs = state.transactions.clone();
    txs.sort_by(|a, b| b.date.cmp(&a.date));
    (StatusCode::OK, Json(json!(txs)))
}

async fn handle_create_tx(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(req): Json<NewTransaction>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    let Some(user_id) = authed_user(&state, &headers) else {
        return unauthorized();
    };

    let tx = Transaction {
        id: Uuid::new_v4().to_string(),
        // Owner enforced from the token, not the body
        user_id,
        user_name: req.user_name,
        date: req.date,
        kind: req.kind,
        category: req.category,
        amount: req.amount,
        payment_method: req.payment_method,
        description: req.description,
        attachment: req.attachment,
        bank_account_id: req.bank_account_id,
        bank_name: req.bank_name,
        investment_type: req.investment_type,
        investors: req.investors,
        created_at: Utc::now(),
    };
    state.transactions.push(tx.clone());
    (StatusCode::CREATED, Json(json!(tx)))
}

async fn handle_update_tx(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(patch): Json<TransactionPatch>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    if authed_user(&state, &headers).is_none() {
        return unauthorized();
    }

    match state.transactions.iter_mut().find(|t| t.id == id) {
        Some(tx) => {
            patch.apply(tx);
            (StatusCode::OK, Json(json!(tx.clone())))
        }
        // Missing target yields a null result, not an error
        None => (StatusCode::OK, Json(Value::Null)),
    }
}

async fn handle_delete_tx(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    if authed_user(&state, &headers).is_none() {
        return unauthorized();
    }
    state.transactions.retain(|t| t.id != id);
    (StatusCode::OK, Json(json!({"message": "Deleted"})))
}

async fn handle_list_banks(State(state): State<Shared>) -> (StatusCode, Json<Value>) {
    let state = state.lock().unwrap();
    (StatusCode::OK, Json(json!(state.banks)))
}

async fn handle_create_bank(
    State(state): State<Shared>,
    Json(req): Json<NewBankCard>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    let card = BankCard {
        id: Uuid::new_v4().to_string(),
        bank_name: req.bank_name,
        card_holder: req.card_holder,
        card_number: req.card_number,
        expiry_date: req.expiry_date,
        card_type: req.card_type,
    };
    state.banks.push(card.clone());
    (StatusCode::CREATED, Json(json!(card)))
}

async fn handle_update_bank(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(req): Json<NewBankCard>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    match state.banks.iter_mut().find(|b| b.id == id) {
        Some(card) => {
            card.bank_name = req.bank_name;
            card.card_holder = req.card_holder;
            card.card_number = req.card_number;
            card.expiry_date = req.expiry_date;
            card.card_type = req.card_type;
            (StatusCode::OK, Json(json!(card.clone())))
        }
        None => (StatusCode::OK, Json(Value::Null)),
    }
}

async fn handle_delete_bank(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.banks.retain(|b| b.id != id);
    (StatusCode::OK, Json(json!({"message": "Deleted"})))
}

async fn handle_list_users(State(state): State<Shared>) -> (StatusCode, Json<Value>) {
    let state = state.lock().unwrap();
    let roster: Vec<Account> = state.users.iter().map(Account::without_credential).collect();
    (StatusCode::OK, Json(json!(roster)))
}
