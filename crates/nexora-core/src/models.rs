//! Domain models for Nexora

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A team member account
///
/// The credential field is carried only so the demo-mode store can verify
/// logins; roster listings strip it before returning records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Role label shown on the team roster ("Member" when empty)
    #[serde(default)]
    pub position: String,
    /// Opaque credential; never present on records returned by list operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Copy of this record with the credential removed
    pub fn without_credential(&self) -> Self {
        Self {
            password: None,
            ..self.clone()
        }
    }
}

/// Registration request fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub position: String,
}

impl NewAccount {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Name is required".to_string()));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(Error::Validation("A valid email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(Error::Validation("Password is required".to_string()));
        }
        Ok(())
    }
}

/// Transaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment channel used for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    /// Google Pay (UPI)
    Gpay,
    PhonePe,
    Paytm,
    FamPay,
    /// Debit/credit card
    Card,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Gpay => "GPAY",
            Self::PhonePe => "PHONE_PE",
            Self::Paytm => "PAYTM",
            Self::FamPay => "FAM_PAY",
            Self::Card => "CARD",
            Self::BankTransfer => "BANK_TRANSFER",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "CASH" => Ok(Self::Cash),
            "GPAY" | "GOOGLE_PAY" => Ok(Self::Gpay),
            "PHONE_PE" | "PHONEPE" => Ok(Self::PhonePe),
            "PAYTM" => Ok(Self::Paytm),
            "FAM_PAY" | "FAMPAY" => Ok(Self::FamPay),
            "CARD" => Ok(Self::Card),
            "BANK_TRANSFER" | "BANKTRANSFER" => Ok(Self::BankTransfer),
            _ => Err(format!("Unknown payment method: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Contribution structure of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentType {
    Single,
    Team,
}

impl InvestmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "SINGLE",
            Self::Team => "TEAM",
        }
    }
}

impl std::str::FromStr for InvestmentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SINGLE" => Ok(Self::Single),
            "TEAM" => Ok(Self::Team),
            _ => Err(format!("Unknown investment type: {}", s)),
        }
    }
}

impl std::fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial record in the shared team ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(alias = "_id")]
    pub id: String,
    /// Owning account id, denormalized at write time
    pub user_id: String,
    /// Display name of the account that recorded this transaction
    pub user_name: String,
    /// Occurrence date (calendar precision)
    #[serde(with = "flexible_date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Self-describing data-URL blob (see [`crate::attachment`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_type: Option<InvestmentType>,
    /// Contributor names; present only for TEAM expenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investors: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a transaction; id and createdAt are assigned by the
/// store that persists it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub user_id: String,
    pub user_name: String,
    #[serde(with = "flexible_date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_type: Option<InvestmentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investors: Option<Vec<String>>,
}

impl NewTransaction {
    /// Validate invariants before any write.
    ///
    /// Amount must be positive, category must be present, and a TEAM expense
    /// needs at least one contributor name.
    pub fn validate(&self) -> Result<()> {
        if !(self.amount > 0.0) {
            return Err(Error::Validation("Amount must be positive".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(Error::Validation("Category is required".to_string()));
        }
        if self.user_name.trim().is_empty() {
            return Err(Error::Validation("Recorder name is required".to_string()));
        }
        if self.kind == TransactionKind::Expense
            && self.investment_type == Some(InvestmentType::Team)
            && self.investors.as_ref().map_or(true, |v| v.is_empty())
        {
            return Err(Error::Validation(
                "A team expense needs at least one contributor name".to_string(),
            ));
        }
        Ok(())
    }

    /// Drop contribution-structure fields where they do not apply.
    ///
    /// Income rows never carry investmentType/investors, and investors are
    /// only meaningful on TEAM expenses.
    pub fn normalized(mut self) -> Self {
        if self.kind != TransactionKind::Expense {
            self.investment_type = None;
            self.investors = None;
        } else if self.investment_type != Some(InvestmentType::Team) {
            self.investors = None;
        }
        self
    }
}

/// Partial update for a transaction; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_type: Option<InvestmentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investors: Option<Vec<String>>,
}

impl TransactionPatch {
    /// Check the fields this patch would change against the same rules that
    /// gate a new transaction.
    pub fn validate(&self) -> Result<()> {
        if let Some(amount) = self.amount {
            if !(amount > 0.0) {
                return Err(Error::Validation("Amount must be positive".to_string()));
            }
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(Error::Validation("Category is required".to_string()));
            }
        }
        Ok(())
    }

    /// Merge this patch into an existing record (demo-mode update path)
    pub fn apply(&self, tx: &mut Transaction) {
        if let Some(date) = self.date {
            tx.date = date;
        }
        if let Some(kind) = self.kind {
            tx.kind = kind;
        }
        if let Some(category) = &self.category {
            tx.category = category.clone();
        }
        if let Some(amount) = self.amount {
            tx.amount = amount;
        }
        if let Some(method) = self.payment_method {
            tx.payment_method = method;
        }
        if let Some(description) = &self.description {
            tx.description = Some(description.clone());
        }
        if let Some(attachment) = &self.attachment {
            tx.attachment = Some(attachment.clone());
        }
        if let Some(bank_account_id) = &self.bank_account_id {
            tx.bank_account_id = Some(bank_account_id.clone());
        }
        if let Some(bank_name) = &self.bank_name {
            tx.bank_name = Some(bank_name.clone());
        }
        if let Some(investment_type) = self.investment_type {
            tx.investment_type = Some(investment_type);
        }
        if let Some(investors) = &self.investors {
            tx.investors = Some(investors.clone());
        }
    }
}

/// Card types for stored payment instruments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Debit,
    Credit,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }
}

impl std::str::FromStr for CardType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBIT" => Ok(Self::Debit),
            "CREDIT" => Ok(Self::Credit),
            _ => Err(format!("Unknown card type: {}", s)),
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored bank card record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankCard {
    #[serde(alias = "_id")]
    pub id: String,
    pub bank_name: String,
    pub card_holder: String,
    /// Display string; no validation beyond presence
    pub card_number: String,
    pub expiry_date: String,
    pub card_type: CardType,
}

/// Fields for creating or updating a bank card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBankCard {
    pub bank_name: String,
    pub card_holder: String,
    pub card_number: String,
    pub expiry_date: String,
    pub card_type: CardType,
}

impl NewBankCard {
    pub fn validate(&self) -> Result<()> {
        if self.bank_name.trim().is_empty() {
            return Err(Error::Validation("Bank name is required".to_string()));
        }
        if self.card_holder.trim().is_empty() {
            return Err(Error::Validation("Cardholder name is required".to_string()));
        }
        if self.card_number.trim().is_empty() {
            return Err(Error::Validation("Card number is required".to_string()));
        }
        Ok(())
    }
}

/// Occurrence-date (de)serialization tolerant of full timestamps.
///
/// The document store behind the reference API returns BSON dates as RFC 3339
/// strings; only the calendar-date prefix is meaningful here.
pub(crate) mod flexible_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
    }

    pub(crate) fn parse(raw: &str) -> Option<NaiveDate> {
        let head = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }
}
