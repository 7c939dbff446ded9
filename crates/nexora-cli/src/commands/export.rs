//! CSV export command

use std::path::Path;

use anyhow::{Context, Result};
use nexora_core::export::{transactions_to_csv, write_transactions_csv};
use nexora_core::{Store, StoreClient};

use super::require_session;

pub async fn cmd_export(store: &StoreClient, output: Option<&Path>) -> Result<()> {
    let viewer = require_session(store)?;
    let transactions = store.list_transactions(&viewer).await?;

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_transactions_csv(file, &transactions)?;
            println!("✅ Exported {} transactions to {}", transactions.len(), path.display());
        }
        None => {
            let csv = transactions_to_csv(&transactions)?;
            print!("{}", csv);
        }
    }

    Ok(())
}
