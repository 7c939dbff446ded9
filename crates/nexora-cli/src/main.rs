//! Nexora CLI - Shared finance tracker for small teams
//!
//! Usage:
//!   nexora register --name Asha --email a@x.dev --password secret
//!   nexora transactions add --category Food --amount 250
//!   nexora dashboard --watch
//!   nexora export --output ledger.csv
//!
//! Set NEXORA_API_URL to work against a Nexora API server; leave it unset
//! to keep everything in local files (demo mode).

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use nexora_core::ChangeNotifier;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::resolve_config(&cli);
    let store = commands::open_store(&config)?;

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
            position,
        } => commands::cmd_register(&store, &name, &email, &password, &position).await,
        Commands::Login { email, password } => commands::cmd_login(&store, &email, &password).await,
        Commands::Logout => commands::cmd_logout(&store).await,
        Commands::Whoami => commands::cmd_whoami(&store),
        Commands::Transactions { action } => match action {
            None | Some(TransactionsAction::List { limit: 20 }) => {
                commands::cmd_transactions_list(&store, 20).await
            }
            Some(TransactionsAction::List { limit }) => {
                commands::cmd_transactions_list(&store, limit).await
            }
            Some(TransactionsAction::Add {
                kind,
                category,
                amount,
                date,
                method,
                description,
                bank,
                investment_type,
                investors,
                attachment,
            }) => {
                commands::cmd_transactions_add(
                    &store,
                    commands::AddTransactionArgs {
                        kind,
                        category,
                        amount,
                        date,
                        method,
                        description,
                        bank,
                        investment_type,
                        investors,
                        attachment,
                    },
                )
                .await
            }
            Some(TransactionsAction::Edit {
                id,
                category,
                amount,
                date,
                description,
            }) => {
                commands::cmd_transactions_edit(
                    &store,
                    &id,
                    category,
                    amount,
                    date.as_deref(),
                    description,
                )
                .await
            }
            Some(TransactionsAction::Delete { id }) => {
                commands::cmd_transactions_delete(&store, &id).await
            }
            Some(TransactionsAction::BulkDelete { ids }) => {
                commands::cmd_transactions_bulk_delete(&store, &ids).await
            }
            Some(TransactionsAction::SetCategory { category, ids }) => {
                commands::cmd_transactions_set_category(&store, &ids, &category).await
            }
        },
        Commands::Banks { action } => match action {
            None | Some(BanksAction::List) => commands::cmd_banks_list(&store).await,
            Some(BanksAction::Save {
                id,
                bank,
                holder,
                number,
                expiry,
                card_type,
            }) => {
                commands::cmd_banks_save(
                    &store,
                    id.as_deref(),
                    &bank,
                    &holder,
                    &number,
                    &expiry,
                    &card_type,
                )
                .await
            }
            Some(BanksAction::Delete { id }) => commands::cmd_banks_delete(&store, &id).await,
        },
        Commands::Team => commands::cmd_team(&store).await,
        Commands::Dashboard { watch } => {
            let notifier = ChangeNotifier::from_config(&config);
            commands::cmd_dashboard(&store, &notifier, watch).await
        }
        Commands::Export { output } => commands::cmd_export(&store, output.as_deref()).await,
    }
}
