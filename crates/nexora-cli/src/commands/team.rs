//! Team roster command

use anyhow::Result;
use nexora_core::{Store, StoreClient};

pub async fn cmd_team(store: &StoreClient) -> Result<()> {
    let roster = store.list_accounts().await?;

    if roster.is_empty() {
        println!("No accounts yet.");
        return Ok(());
    }

    println!();
    println!("👥 Team ({} members)", roster.len());
    println!("   ─────────────────────────────────────");

    for member in roster {
        if member.position.is_empty() {
            println!("   {} <{}>", member.name, member.email);
        } else {
            println!("   {} <{}> ({})", member.name, member.email, member.position);
        }
    }

    Ok(())
}
