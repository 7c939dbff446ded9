//! Local key-value backend (offline/demo mode)
//!
//! Everything lives in JSON files under the data directory, one key per
//! entity kind. Operations complete without any network latency but keep the
//! async contract for interface parity with the remote backend. Credentials
//! are compared in plaintext: this is a demo convenience, not a security
//! model.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::kv::KvStore;
use super::Store;
use crate::error::{Error, Result};
use crate::models::{
    Account, BankCard, NewAccount, NewBankCard, NewTransaction, Transaction, TransactionPatch,
};
use crate::session::SessionStore;

const USERS_KEY: &str = "nexora_users";
const TRANSACTIONS_KEY: &str = "nexora_transactions";
const BANKS_KEY: &str = "nexora_banks";

/// Demo-mode store over namespaced key-value files
#[derive(Clone)]
pub struct LocalStore {
    kv: KvStore,
    sessions: SessionStore,
}

impl LocalStore {
    /// Open (or create) the demo store under the given data directory
    pub fn open(data_dir: &Path) -> Result<Self> {
        let kv = KvStore::open(data_dir)?;
        let sessions = SessionStore::new(kv.clone());
        Ok(Self { kv, sessions })
    }

    /// The session slot owned by this store
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    fn accounts(&self) -> Result<Vec<Account>> {
        Ok(self.kv.get(USERS_KEY)?.unwrap_or_default())
    }

    fn transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.kv.get(TRANSACTIONS_KEY)?.unwrap_or_default())
    }

    fn save_transactions(&self, txs: &[Transaction]) -> Result<()> {
        self.kv.put(TRANSACTIONS_KEY, &txs)
    }

    fn bank_cards(&self) -> Result<Vec<BankCard>> {
        Ok(self.kv.get(BANKS_KEY)?.unwrap_or_default())
    }
}

#[async_trait]
impl Store for LocalStore {
    async fn register(&self, account: NewAccount) -> Result<Account> {
        account.validate()?;

        let mut accounts = self.accounts()?;
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(Error::DuplicateEmail);
        }

        let record = Account {
            id: Uuid::new_v4().to_string(),
            name: account.name,
            email: account.email,
            position: account.position,
            password: Some(account.password),
            created_at: Utc::now(),
        };
        accounts.push(record.clone());
        self.kv.put(USERS_KEY, &accounts)?;

        // Local sessions have no token issuer
        self.sessions.save(&record, None)?;
        debug!(email = %record.email, "Registered account in demo store");
        Ok(record)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Account> {
        let accounts = self.accounts()?;
        let account = accounts
            .iter()
            .find(|a| a.email == email && a.password.as_deref() == Some(password))
            .ok_or(Error::InvalidCredentials)?;

        self.sessions.save(account, None)?;
        Ok(account.clone())
    }

    async fn logout(&self) {
        self.sessions.clear();
    }

    fn current_session(&self) -> Option<Account> {
        self.sessions.current()
    }

    async fn list_transactions(&self, _viewer: &Account) -> Result<Vec<Transaction>> {
        // Shared team ledger: no viewer filtering, newest first
        let mut txs = self.transactions()?;
        txs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(txs)
    }

    async fn create_transaction(&self, tx: NewTransaction) -> Result<()> {
        let tx = tx.normalized();
        tx.validate()?;

        let mut all = self.transactions()?;
        all.push(Transaction {
            id: Uuid::new_v4().to_string(),
            user_id: tx.user_id,
            user_name: tx.user_name,
            date: tx.date,
            kind: tx.kind,
            category: tx.category,
            amount: tx.amount,
            payment_method: tx.payment_method,
            description: tx.description,
            attachment: tx.attachment,
            bank_account_id: tx.bank_account_id,
            bank_name: tx.bank_name,
            investment_type: tx.investment_type,
            investors: tx.investors,
            created_at: Utc::now(),
        });
        self.save_transactions(&all)
    }

    async fn update_transaction(&self, id: &str, patch: TransactionPatch) -> Result<()> {
        patch.validate()?;
        let mut all = self.transactions()?;
        if let Some(tx) = all.iter_mut().find(|t| t.id == id) {
            patch.apply(tx);
            self.save_transactions(&all)?;
        }
        // Missing id: silent no-op, matching the reference behavior
        Ok(())
    }

    async fn delete_transaction(&self, id: &str) -> Result<()> {
        let mut all = self.transactions()?;
        let before = all.len();
        all.retain(|t| t.id != id);
        if all.len() != before {
            self.save_transactions(&all)?;
        }
        Ok(())
    }

    async fn bulk_delete(&self, ids: &[String]) -> Result<()> {
        let mut all = self.transactions()?;
        all.retain(|t| !ids.contains(&t.id));
        self.save_transactions(&all)
    }

    async fn bulk_set_category(&self, ids: &[String], category: &str) -> Result<()> {
        let mut all = self.transactions()?;
        for tx in all.iter_mut().filter(|t| ids.contains(&t.id)) {
            tx.category = category.to_string();
        }
        self.save_transactions(&all)
    }

    async fn list_bank_cards(&self) -> Result<Vec<BankCard>> {
        self.bank_cards()
    }

    async fn upsert_bank_card(&self, card: NewBankCard, id: Option<&str>) -> Result<()> {
        card.validate()?;

        let mut cards = self.bank_cards()?;
        match id {
            Some(id) => {
                if let Some(existing) = cards.iter_mut().find(|c| c.id == id) {
                    existing.bank_name = card.bank_name;
                    existing.card_holder = card.card_holder;
                    existing.card_number = card.card_number;
                    existing.expiry_date = card.expiry_date;
                    existing.card_type = card.card_type;
                }
            }
            None => cards.push(BankCard {
                id: Uuid::new_v4().to_string(),
                bank_name: card.bank_name,
                card_holder: card.card_holder,
                card_number: card.card_number,
                expiry_date: card.expiry_date,
                card_type: card.card_type,
            }),
        }
        self.kv.put(BANKS_KEY, &cards)
    }

    async fn delete_bank_card(&self, id: &str) -> Result<()> {
        let mut cards = self.bank_cards()?;
        cards.retain(|c| c.id != id);
        self.kv.put(BANKS_KEY, &cards)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        Ok(self
            .accounts()?
            .iter()
            .map(Account::without_credential)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardType, InvestmentType, PaymentMethod, TransactionKind};
    use chrono::NaiveDate;

    fn open_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        (dir, store)
    }

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "Asha".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            position: "Founder".to_string(),
        }
    }

    fn new_tx(amount: f64, date: NaiveDate) -> NewTransaction {
        NewTransaction {
            user_id: "u1".to_string(),
            user_name: "Asha".to_string(),
            date,
            kind: TransactionKind::Expense,
            category: "Food".to_string(),
            amount,
            payment_method: PaymentMethod::Cash,
            description: Some("lunch".to_string()),
            attachment: None,
            bank_account_id: None,
            bank_name: None,
            investment_type: Some(InvestmentType::Single),
            investors: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_register_establishes_session() {
        let (_dir, store) = open_store();
        let account = store.register(new_account("asha@nexora.dev")).await.unwrap();
        assert!(!account.id.is_empty());

        let session = store.current_session().unwrap();
        assert_eq!(session.email, "asha@nexora.dev");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_without_second_record() {
        let (_dir, store) = open_store();
        store.register(new_account("asha@nexora.dev")).await.unwrap();

        let err = store.register(new_account("asha@nexora.dev")).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateEmail));

        assert_eq!(store.list_accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_login_logout_cycle() {
        let (_dir, store) = open_store();
        store.register(new_account("asha@nexora.dev")).await.unwrap();
        store.logout().await;
        assert!(store.current_session().is_none());

        let err = store.login("asha@nexora.dev", "wrong").await.unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
        assert!(store.current_session().is_none());

        let account = store.login("asha@nexora.dev", "secret").await.unwrap();
        assert_eq!(store.current_session().unwrap().id, account.id);
    }

    #[tokio::test]
    async fn test_transaction_roundtrip_preserves_fields() {
        let (_dir, store) = open_store();
        let viewer = store.register(new_account("asha@nexora.dev")).await.unwrap();

        let mut data = new_tx(250.0, day(2026, 3, 14));
        data.bank_name = Some("HDFC".to_string());
        store.create_transaction(data.clone()).await.unwrap();

        let listed = store.list_transactions(&viewer).await.unwrap();
        assert_eq!(listed.len(), 1);
        let tx = &listed[0];
        assert!(!tx.id.is_empty());
        assert_eq!(tx.amount, data.amount);
        assert_eq!(tx.category, data.category);
        assert_eq!(tx.date, data.date);
        assert_eq!(tx.description, data.description);
        assert_eq!(tx.bank_name, data.bank_name);
        assert_eq!(tx.payment_method, data.payment_method);
    }

    #[tokio::test]
    async fn test_list_sorted_newest_first_for_any_viewer() {
        let (_dir, store) = open_store();
        let viewer = store.register(new_account("asha@nexora.dev")).await.unwrap();

        store.create_transaction(new_tx(1.0, day(2026, 1, 5))).await.unwrap();
        store.create_transaction(new_tx(2.0, day(2026, 4, 2))).await.unwrap();
        store.create_transaction(new_tx(3.0, day(2026, 2, 9))).await.unwrap();

        let listed = store.list_transactions(&viewer).await.unwrap();
        let dates: Vec<NaiveDate> = listed.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![day(2026, 4, 2), day(2026, 2, 9), day(2026, 1, 5)]);

        // Shared ledger: another viewer sees the same records
        let other = store.register(new_account("ravi@nexora.dev")).await.unwrap();
        assert_eq!(store.list_transactions(&other).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_team_expense_with_empty_investors_rejected() {
        let (_dir, store) = open_store();
        let viewer = store.register(new_account("asha@nexora.dev")).await.unwrap();

        let mut data = new_tx(100.0, day(2026, 3, 14));
        data.investment_type = Some(InvestmentType::Team);
        data.investors = Some(vec![]);

        let err = store.create_transaction(data).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(store.list_transactions(&viewer).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_and_missing_id_noops() {
        let (_dir, store) = open_store();
        let viewer = store.register(new_account("asha@nexora.dev")).await.unwrap();
        store.create_transaction(new_tx(100.0, day(2026, 3, 14))).await.unwrap();
        let id = store.list_transactions(&viewer).await.unwrap()[0].id.clone();

        let patch = TransactionPatch {
            amount: Some(175.0),
            ..Default::default()
        };
        store.update_transaction(&id, patch.clone()).await.unwrap();
        let tx = store.list_transactions(&viewer).await.unwrap().remove(0);
        assert_eq!(tx.amount, 175.0);
        assert_eq!(tx.category, "Food");

        // Unknown id: nothing changes, nothing fails
        store.update_transaction("no-such-id", patch).await.unwrap();
        assert_eq!(store.list_transactions(&viewer).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_non_positive_amount() {
        let (_dir, store) = open_store();
        let viewer = store.register(new_account("asha@nexora.dev")).await.unwrap();
        store.create_transaction(new_tx(100.0, day(2026, 3, 14))).await.unwrap();
        let id = store.list_transactions(&viewer).await.unwrap()[0].id.clone();

        let patch = TransactionPatch {
            amount: Some(-50.0),
            ..Default::default()
        };
        let err = store.update_transaction(&id, patch).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        // The stored record is untouched
        let tx = store.list_transactions(&viewer).await.unwrap().remove(0);
        assert_eq!(tx.amount, 100.0);
    }

    #[tokio::test]
    async fn test_bulk_delete_idempotent() {
        let (_dir, store) = open_store();
        let viewer = store.register(new_account("asha@nexora.dev")).await.unwrap();
        for i in 1..=3 {
            store.create_transaction(new_tx(i as f64, day(2026, 3, i))).await.unwrap();
        }
        let ids: Vec<String> = store
            .list_transactions(&viewer)
            .await
            .unwrap()
            .iter()
            .take(2)
            .map(|t| t.id.clone())
            .collect();

        store.bulk_delete(&ids).await.unwrap();
        let remaining = store.list_transactions(&viewer).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(!remaining.iter().any(|t| ids.contains(&t.id)));

        // Deleting the same ids again is a no-op
        store.bulk_delete(&ids).await.unwrap();
        store.delete_transaction(&ids[0]).await.unwrap();
        assert_eq!(store.list_transactions(&viewer).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bulk_set_category() {
        let (_dir, store) = open_store();
        let viewer = store.register(new_account("asha@nexora.dev")).await.unwrap();
        for i in 1..=3 {
            store.create_transaction(new_tx(i as f64, day(2026, 3, i))).await.unwrap();
        }
        let all = store.list_transactions(&viewer).await.unwrap();
        let ids: Vec<String> = all.iter().take(2).map(|t| t.id.clone()).collect();

        store.bulk_set_category(&ids, "Travel").await.unwrap();
        let relisted = store.list_transactions(&viewer).await.unwrap();
        assert_eq!(
            relisted.iter().filter(|t| t.category == "Travel").count(),
            2
        );
        assert_eq!(relisted.iter().filter(|t| t.category == "Food").count(), 1);
    }

    #[tokio::test]
    async fn test_bank_card_upsert_and_delete() {
        let (_dir, store) = open_store();
        let card = NewBankCard {
            bank_name: "HDFC".to_string(),
            card_holder: "Asha".to_string(),
            card_number: "4111 1111 1111 1111".to_string(),
            expiry_date: "09/29".to_string(),
            card_type: CardType::Debit,
        };

        store.upsert_bank_card(card.clone(), None).await.unwrap();
        let cards = store.list_bank_cards().await.unwrap();
        assert_eq!(cards.len(), 1);
        let id = cards[0].id.clone();

        let mut updated = card.clone();
        updated.card_type = CardType::Credit;
        store.upsert_bank_card(updated, Some(&id)).await.unwrap();
        let cards = store.list_bank_cards().await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].card_type, CardType::Credit);

        store.delete_bank_card(&id).await.unwrap();
        assert!(store.list_bank_cards().await.unwrap().is_empty());
        // Absent id stays a no-op
        store.delete_bank_card(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_roster_never_exposes_credentials() {
        let (_dir, store) = open_store();
        store.register(new_account("asha@nexora.dev")).await.unwrap();
        store.register(new_account("ravi@nexora.dev")).await.unwrap();

        let roster = store.list_accounts().await.unwrap();
        assert_eq!(roster.len(), 2);
        assert!(roster.iter().all(|a| a.password.is_none()));
    }
}
