//! Ledger export
//!
//! Writes the transaction list as CSV with the same column set the reference
//! UI produces, so exports stay interchangeable.

use std::io::Write;

use crate::error::Result;
use crate::models::Transaction;

const HEADERS: [&str; 10] = [
    "Date",
    "Name",
    "Type",
    "Category",
    "Amount",
    "PaymentMethod",
    "Description",
    "Bank",
    "InvestmentType",
    "TeamMembers",
];

/// Write transactions as CSV to any writer
pub fn write_transactions_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for tx in transactions {
        csv_writer.write_record([
            tx.date.format("%Y-%m-%d").to_string(),
            tx.user_name.clone(),
            tx.kind.to_string(),
            tx.category.clone(),
            format!("{}", tx.amount),
            tx.payment_method.to_string(),
            tx.description.clone().unwrap_or_default(),
            tx.bank_name.clone().unwrap_or_default(),
            tx.investment_type
                .map(|t| t.to_string())
                .unwrap_or_default(),
            tx.investors
                .as_ref()
                .map(|names| names.join(", "))
                .unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render transactions as a CSV string
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<String> {
    let mut buffer = Vec::new();
    write_transactions_csv(&mut buffer, transactions)?;
    String::from_utf8(buffer)
        .map_err(|e| crate::error::Error::Storage(format!("CSV output was not UTF-8: {}", e)))
}
