//! Transaction command implementations

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use nexora_core::{
    Attachment, InvestmentType, NewTransaction, PaymentMethod, Store, StoreClient,
    TransactionKind, TransactionPatch,
};

use super::{require_session, truncate};

/// Arguments for `nexora transactions add`
pub struct AddTransactionArgs {
    pub kind: String,
    pub category: String,
    pub amount: f64,
    pub date: Option<String>,
    pub method: String,
    pub description: Option<String>,
    pub bank: Option<String>,
    pub investment_type: Option<String>,
    pub investors: Option<String>,
    pub attachment: Option<std::path::PathBuf>,
}

pub async fn cmd_transactions_list(store: &StoreClient, limit: usize) -> Result<()> {
    let viewer = require_session(store)?;
    let transactions = store.list_transactions(&viewer).await?;

    if transactions.is_empty() {
        println!("No transactions yet. Record one with:");
        println!("  nexora transactions add --category Food --amount 250");
        return Ok(());
    }

    println!();
    println!("📝 Transactions ({} total)", transactions.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions.iter().take(limit) {
        let amount_str = match tx.kind {
            TransactionKind::Expense => format!("\x1b[31m-₹{:.2}\x1b[0m", tx.amount),
            TransactionKind::Income => format!("\x1b[32m+₹{:.2}\x1b[0m", tx.amount),
        };

        println!(
            "   [{}] {} │ {:>12} │ {:<14} │ {}",
            truncate(&tx.id, 8),
            tx.date,
            amount_str,
            truncate(&tx.category, 14),
            tx.user_name
        );
    }

    if transactions.len() > limit {
        println!();
        println!("   ({} more, rerun with --limit)", transactions.len() - limit);
    }

    Ok(())
}

pub async fn cmd_transactions_add(store: &StoreClient, args: AddTransactionArgs) -> Result<()> {
    let session = require_session(store)?;

    let kind: TransactionKind = args.kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let payment_method: PaymentMethod =
        args.method.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let investment_type = args
        .investment_type
        .as_deref()
        .map(|s| s.parse::<InvestmentType>())
        .transpose()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let date = parse_date_or_today(args.date.as_deref())?;

    let investors = args.investors.as_deref().map(|list| {
        list.split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
    });

    let attachment = args
        .attachment
        .as_deref()
        .map(read_attachment)
        .transpose()?;

    let tx = NewTransaction {
        user_id: session.id,
        user_name: session.name,
        date,
        kind,
        category: args.category,
        amount: args.amount,
        payment_method,
        description: args.description,
        attachment,
        bank_account_id: None,
        bank_name: args.bank,
        investment_type,
        investors,
    };

    store.create_transaction(tx).await?;
    println!("✅ Recorded {} of ₹{:.2} on {}", kind, args.amount, date);
    Ok(())
}

pub async fn cmd_transactions_edit(
    store: &StoreClient,
    id: &str,
    category: Option<String>,
    amount: Option<f64>,
    date: Option<&str>,
    description: Option<String>,
) -> Result<()> {
    let patch = TransactionPatch {
        category,
        amount,
        date: date
            .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .transpose()
            .context("Invalid --date format (use YYYY-MM-DD)")?,
        description,
        ..Default::default()
    };

    store.update_transaction(id, patch).await?;
    println!("✅ Updated transaction {}", id);
    Ok(())
}

pub async fn cmd_transactions_delete(store: &StoreClient, id: &str) -> Result<()> {
    store.delete_transaction(id).await?;
    println!("✅ Deleted transaction {}", id);
    Ok(())
}

pub async fn cmd_transactions_bulk_delete(store: &StoreClient, ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        println!("No transaction IDs given.");
        return Ok(());
    }
    store.bulk_delete(ids).await?;
    println!("✅ Deleted {} transactions", ids.len());
    Ok(())
}

pub async fn cmd_transactions_set_category(
    store: &StoreClient,
    ids: &[String],
    category: &str,
) -> Result<()> {
    if ids.is_empty() {
        println!("No transaction IDs given.");
        return Ok(());
    }
    store.bulk_set_category(ids, category).await?;
    println!("✅ Moved {} transactions to {}", ids.len(), category);
    Ok(())
}

fn parse_date_or_today(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --date format (use YYYY-MM-DD)"),
        None => Ok(Local::now().date_naive()),
    }
}

/// Read a receipt image and inline it as a data URL
fn read_attachment(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read attachment {}", path.display()))?;
    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    };
    let attachment = Attachment {
        mime: mime.to_string(),
        bytes,
    };
    Ok(attachment.to_data_url()?)
}
