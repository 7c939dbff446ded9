//! Dashboard command and the watch loop

use anyhow::Result;
use chrono::Local;
use nexora_core::{compute_dashboard, ChangeNotifier, DashboardReport, Store, StoreClient};
use tokio::sync::mpsc;
use tracing::info;

use super::require_session;

pub async fn cmd_dashboard(store: &StoreClient, notifier: &ChangeNotifier, watch: bool) -> Result<()> {
    render_dashboard(store).await?;

    if !watch {
        return Ok(());
    }
    if store.is_offline() {
        println!("  (offline mode: nothing polls for changes, --watch has no effect)");
        return Ok(());
    }

    // Re-render on every change signal until interrupted
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _subscription = notifier.subscribe(move || {
        let _ = tx.send(());
    });

    info!("Watching for ledger changes (Ctrl-C to stop)");
    loop {
        tokio::select! {
            signal = rx.recv() => {
                if signal.is_none() {
                    return Ok(());
                }
                render_dashboard(store).await?;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                return Ok(());
            }
        }
    }
}

async fn render_dashboard(store: &StoreClient) -> Result<()> {
    let viewer = require_session(store)?;
    let transactions = store.list_transactions(&viewer).await?;
    let report = compute_dashboard(&transactions, Local::now().date_naive());
    print_report(&report);
    Ok(())
}

fn print_report(report: &DashboardReport) {
    let stats = &report.stats;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           💰 Nexora Dashboard           │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Balance:         ₹{:.2}", stats.balance);
    println!("  Total Income:    ₹{:.2}", stats.total_income);
    println!("  Total Expense:   ₹{:.2}", stats.total_expense);
    println!();
    println!(
        "  Today:      +₹{:.2} / -₹{:.2}",
        stats.today_income, stats.today_expense
    );
    println!(
        "  This Month: +₹{:.2} / -₹{:.2}",
        stats.month_income, stats.month_expense
    );
    println!(
        "  This Year:  +₹{:.2} / -₹{:.2}",
        stats.year_income, stats.year_expense
    );

    let active_months: Vec<_> = report
        .monthly
        .iter()
        .filter(|m| m.income > 0.0 || m.expense > 0.0)
        .collect();
    if !active_months.is_empty() {
        println!();
        println!("  📅 Monthly Activity");
        for point in active_months {
            println!(
                "     {} │ +₹{:>10.2} │ -₹{:>10.2}",
                point.month, point.income, point.expense
            );
        }
    }

    if !report.categories.is_empty() {
        println!();
        println!("  📊 Top Expense Categories");
        for entry in &report.categories {
            println!("     {:<20} ₹{:.2}", entry.category, entry.amount);
        }
    }

    if !report.contributors.is_empty() {
        println!();
        println!("  👥 Recorded By");
        for entry in &report.contributors {
            println!("     {:<20} ₹{:.2}", entry.name, entry.amount);
        }
    }

    println!();
}
