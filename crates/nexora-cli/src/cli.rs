//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nexora - Team finance tracker
#[derive(Parser)]
#[command(name = "nexora")]
#[command(about = "Shared income and expense tracking for small teams", long_about = None)]
#[command(version)]
pub struct Cli {
    /// REST API base URL (e.g. http://localhost:4000/api)
    ///
    /// Defaults to the NEXORA_API_URL environment variable. When neither is
    /// set, all data lives in local files (offline/demo mode).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Data directory for local storage and the session snapshot
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(long)]
        name: String,

        /// Email address (must be unique)
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Role or position within the team
        #[arg(long, default_value = "")]
        position: String,
    },

    /// Sign in with an existing account
    Login {
        /// Email address
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long)]
        password: String,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show the currently signed-in account
    Whoami,

    /// Manage transactions (list, add, edit, delete, bulk operations)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage bank cards (list, save, delete)
    Banks {
        #[command(subcommand)]
        action: Option<BanksAction>,
    },

    /// List the team roster
    Team,

    /// Show the dashboard summary
    Dashboard {
        /// Re-render whenever the ledger may have changed (remote mode only)
        #[arg(long)]
        watch: bool,
    },

    /// Export the ledger to CSV
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions, newest first
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Record a new transaction
    Add {
        /// income or expense
        #[arg(long, default_value = "expense")]
        kind: String,

        /// Category (e.g. Food, Travel, Salary)
        #[arg(long)]
        category: String,

        /// Amount (positive)
        #[arg(long)]
        amount: f64,

        /// Occurrence date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Payment method: cash, gpay, phonepe, paytm, fampay, card, bank-transfer
        #[arg(long, default_value = "cash")]
        method: String,

        /// Free-form note
        #[arg(long)]
        description: Option<String>,

        /// Bank name the money moved through
        #[arg(long)]
        bank: Option<String>,

        /// Contribution structure for expenses: single or team
        #[arg(long)]
        investment_type: Option<String>,

        /// Contributor names for a team expense (comma-separated)
        #[arg(long)]
        investors: Option<String>,

        /// Receipt image to attach (stored inline, max 5 MB)
        #[arg(long)]
        attachment: Option<PathBuf>,
    },

    /// Update fields of an existing transaction
    Edit {
        /// Transaction ID
        id: String,

        /// New category
        #[arg(long)]
        category: Option<String>,

        /// New amount
        #[arg(long)]
        amount: Option<f64>,

        /// New occurrence date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },

    /// Delete several transactions at once
    BulkDelete {
        /// Transaction IDs
        ids: Vec<String>,
    },

    /// Re-categorize several transactions at once
    SetCategory {
        /// New category
        #[arg(long)]
        category: String,

        /// Transaction IDs
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum BanksAction {
    /// List stored bank cards
    List,

    /// Create a bank card, or update one when --id is given
    Save {
        /// Card ID to update (omit to create)
        #[arg(long)]
        id: Option<String>,

        /// Bank name
        #[arg(long)]
        bank: String,

        /// Cardholder name
        #[arg(long)]
        holder: String,

        /// Card number
        #[arg(long)]
        number: String,

        /// Expiry date (MM/YY)
        #[arg(long)]
        expiry: String,

        /// debit or credit
        #[arg(long, default_value = "debit")]
        card_type: String,
    },

    /// Delete a bank card
    Delete {
        /// Card ID
        id: String,
    },
}
