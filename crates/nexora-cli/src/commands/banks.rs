//! Bank card command implementations

use anyhow::Result;
use nexora_core::{CardType, NewBankCard, Store, StoreClient};

use super::truncate;

pub async fn cmd_banks_list(store: &StoreClient) -> Result<()> {
    let cards = store.list_bank_cards().await?;

    if cards.is_empty() {
        println!("No bank cards saved. Add one with:");
        println!("  nexora banks save --bank HDFC --holder Asha --number ... --expiry 09/29");
        return Ok(());
    }

    println!();
    println!("💳 Bank Cards");
    println!("   ─────────────────────────────────────────────");

    for card in cards {
        println!(
            "   [{}] {} │ {} │ {} │ {}",
            truncate(&card.id, 8),
            card.bank_name,
            card.card_holder,
            masked_number(&card.card_number),
            card.card_type
        );
    }

    Ok(())
}

pub async fn cmd_banks_save(
    store: &StoreClient,
    id: Option<&str>,
    bank: &str,
    holder: &str,
    number: &str,
    expiry: &str,
    card_type: &str,
) -> Result<()> {
    let card_type: CardType = card_type.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let card = NewBankCard {
        bank_name: bank.to_string(),
        card_holder: holder.to_string(),
        card_number: number.to_string(),
        expiry_date: expiry.to_string(),
        card_type,
    };

    store.upsert_bank_card(card, id).await?;
    match id {
        Some(id) => println!("✅ Updated card {}", id),
        None => println!("✅ Saved {} card for {}", bank, holder),
    }
    Ok(())
}

pub async fn cmd_banks_delete(store: &StoreClient, id: &str) -> Result<()> {
    store.delete_bank_card(id).await?;
    println!("✅ Deleted card {}", id);
    Ok(())
}

/// Show only the last four digits of a card number
fn masked_number(number: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 4 {
        return digits;
    }
    format!("•••• {}", &digits[digits.len() - 4..])
}
