//! REST API backend (remote mode)
//!
//! HTTP client for the Nexora API. Every request after authentication
//! carries the bearer token from the session slot; a missing token is
//! tolerated (the request goes out unauthenticated) because server-side
//! authorization is the enforcement point. No timeouts and no retries are
//! imposed at this layer.

use std::path::Path;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

use super::kv::KvStore;
use super::Store;
use crate::error::{Error, Result};
use crate::models::{
    Account, BankCard, NewAccount, NewBankCard, NewTransaction, Transaction, TransactionPatch,
};
use crate::session::SessionStore;

/// Remote store over the JSON REST API
#[derive(Clone)]
pub struct RemoteStore {
    http_client: Client,
    base_url: String,
    sessions: SessionStore,
}

/// Error payload of a non-2xx response; the API uses either key
#[derive(Debug, Deserialize)]
struct ApiError {
    error: Option<String>,
    message: Option<String>,
}

/// Response from the auth endpoints
#[derive(Debug, Deserialize)]
struct AuthResponse {
    user: Account,
    token: String,
}

impl RemoteStore {
    /// Create a remote store for the given API base URL.
    ///
    /// The session snapshot still lives on local disk so a restart keeps the
    /// signed-in account.
    pub fn new(base_url: &str, data_dir: &Path) -> Result<Self> {
        let kv = KvStore::open(data_dir)?;
        Ok(Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            sessions: SessionStore::new(kv),
        })
    }

    /// The session slot owned by this store
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token when present and surface non-2xx responses as
    /// `Transport` errors carrying the server-provided message.
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let request = match self.sessions.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = response
            .json::<ApiError>()
            .await
            .ok()
            .and_then(|body| body.error.or(body.message))
            .unwrap_or_else(|| "Request failed".to_string());
        debug!(%status, %message, "API request failed");
        Err(Error::Transport(message))
    }

    /// Map well-known auth failure messages onto their dedicated variants
    fn classify_auth_error(err: Error) -> Error {
        match err {
            Error::Transport(msg) if msg.eq_ignore_ascii_case("email already exists") => {
                Error::DuplicateEmail
            }
            Error::Transport(msg) if msg.eq_ignore_ascii_case("invalid credentials") => {
                Error::InvalidCredentials
            }
            other => other,
        }
    }
}

#[async_trait]
impl Store for RemoteStore {
    async fn register(&self, account: NewAccount) -> Result<Account> {
        account.validate()?;

        let response = self
            .send(
                self.http_client
                    .post(self.endpoint("/auth/register"))
                    .json(&account),
            )
            .await
            .map_err(Self::classify_auth_error)?;

        let auth: AuthResponse = response.json().await?;
        self.sessions.save(&auth.user, Some(&auth.token))?;
        Ok(auth.user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Account> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .send(self.http_client.post(self.endpoint("/auth/login")).json(&body))
            .await
            .map_err(Self::classify_auth_error)?;

        let auth: AuthResponse = response.json().await?;
        self.sessions.save(&auth.user, Some(&auth.token))?;
        Ok(auth.user)
    }

    async fn logout(&self) {
        self.sessions.clear();
    }

    fn current_session(&self) -> Option<Account> {
        self.sessions.current()
    }

    async fn list_transactions(&self, _viewer: &Account) -> Result<Vec<Transaction>> {
        // Shared team ledger: the server ignores the requesting identity and
        // returns every record, already sorted newest first.
        let result = self
            .send(self.http_client.get(self.endpoint("/transactions")))
            .await;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                // A flaky network degrades to an empty ledger view
                warn!(error = %err, "Transaction list failed; returning empty ledger");
                return Ok(Vec::new());
            }
        };
        Ok(response.json().await?)
    }

    async fn create_transaction(&self, tx: NewTransaction) -> Result<()> {
        let tx = tx.normalized();
        tx.validate()?;

        self.send(
            self.http_client
                .post(self.endpoint("/transactions"))
                .json(&tx),
        )
        .await?;
        Ok(())
    }

    async fn update_transaction(&self, id: &str, patch: TransactionPatch) -> Result<()> {
        patch.validate()?;
        self.send(
            self.http_client
                .put(self.endpoint(&format!("/transactions/{}", id)))
                .json(&patch),
        )
        .await?;
        Ok(())
    }

    async fn delete_transaction(&self, id: &str) -> Result<()> {
        self.send(
            self.http_client
                .delete(self.endpoint(&format!("/transactions/{}", id))),
        )
        .await?;
        Ok(())
    }

    // Bulk operations are plain loops over the single-record endpoints.
    // Non-atomic: a failure partway through leaves earlier changes committed.

    async fn bulk_delete(&self, ids: &[String]) -> Result<()> {
        for id in ids {
            self.delete_transaction(id).await?;
        }
        Ok(())
    }

    async fn bulk_set_category(&self, ids: &[String], category: &str) -> Result<()> {
        let patch = TransactionPatch {
            category: Some(category.to_string()),
            ..Default::default()
        };
        for id in ids {
            self.update_transaction(id, patch.clone()).await?;
        }
        Ok(())
    }

    async fn list_bank_cards(&self) -> Result<Vec<BankCard>> {
        let response = self
            .send(self.http_client.get(self.endpoint("/banks")))
            .await?;
        Ok(response.json().await?)
    }

    async fn upsert_bank_card(&self, card: NewBankCard, id: Option<&str>) -> Result<()> {
        card.validate()?;

        match id {
            Some(id) => {
                self.send(
                    self.http_client
                        .put(self.endpoint(&format!("/banks/{}", id)))
                        .json(&card),
                )
                .await?;
            }
            None => {
                self.send(self.http_client.post(self.endpoint("/banks")).json(&card))
                    .await?;
            }
        }
        Ok(())
    }

    async fn delete_bank_card(&self, id: &str) -> Result<()> {
        self.send(
            self.http_client
                .delete(self.endpoint(&format!("/banks/{}", id))),
        )
        .await?;
        Ok(())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let response = self
            .send(self.http_client.get(self.endpoint("/users")))
            .await?;
        let accounts: Vec<Account> = response.json().await?;
        // Roster records never carry the credential field
        Ok(accounts.iter().map(Account::without_credential).collect())
    }
}
