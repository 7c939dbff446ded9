//! Dashboard aggregation
//!
//! Pure derivation of dashboard figures from a raw transaction list. No I/O
//! happens here; callers pull the ledger through the store and hand it in
//! together with the as-of date, so the same list can be re-bucketed as the
//! calendar moves on.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionKind};

/// How many categories the expense breakdown keeps
const TOP_CATEGORIES: usize = 6;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Summary figures for the KPI cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_income: f64,
    pub total_expense: f64,
    /// totalIncome - totalExpense; may be negative
    pub balance: f64,
    pub today_income: f64,
    pub today_expense: f64,
    pub month_income: f64,
    pub month_expense: f64,
    pub year_income: f64,
    pub year_expense: f64,
}

/// One month of the current-year income/expense series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Short month label, "Jan".."Dec"
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Expense total recorded by one team member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributorTotal {
    pub name: String,
    pub amount: f64,
}

/// Everything the dashboard view needs, computed in one pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub stats: DashboardStats,
    /// Always 12 entries, January through December of the as-of year
    pub monthly: Vec<MonthlyPoint>,
    /// Top expense categories, descending, at most 6
    pub categories: Vec<CategoryTotal>,
    /// Expense totals per recording member, descending, no truncation
    pub contributors: Vec<ContributorTotal>,
}

/// Compute the dashboard snapshot for a transaction list as of a given date.
///
/// Bucket membership: "today" is an exact calendar-date match, "month"
/// requires the same month and year as `as_of`, "year" the same year. The
/// monthly series covers only the as-of year. Category and contributor
/// breakdowns count expenses only; the contributor key is the recorder's
/// display name, not the team investor list.
pub fn compute_dashboard(transactions: &[Transaction], as_of: NaiveDate) -> DashboardReport {
    let current_year = as_of.year();
    let current_month = as_of.month();

    let mut stats = DashboardStats {
        total_income: 0.0,
        total_expense: 0.0,
        balance: 0.0,
        today_income: 0.0,
        today_expense: 0.0,
        month_income: 0.0,
        month_expense: 0.0,
        year_income: 0.0,
        year_expense: 0.0,
    };

    // All 12 buckets exist up front so the chart renders empty months too
    let mut monthly: Vec<MonthlyPoint> = MONTH_LABELS
        .iter()
        .map(|label| MonthlyPoint {
            month: (*label).to_string(),
            income: 0.0,
            expense: 0.0,
        })
        .collect();

    let mut category_totals: Vec<CategoryTotal> = Vec::new();
    let mut contributor_totals: Vec<ContributorTotal> = Vec::new();

    for tx in transactions {
        let is_today = tx.date == as_of;
        let is_month = tx.date.month() == current_month && tx.date.year() == current_year;
        let is_year = tx.date.year() == current_year;

        match tx.kind {
            TransactionKind::Income => {
                stats.total_income += tx.amount;
                if is_today {
                    stats.today_income += tx.amount;
                }
                if is_month {
                    stats.month_income += tx.amount;
                }
                if is_year {
                    stats.year_income += tx.amount;
                }
            }
            TransactionKind::Expense => {
                stats.total_expense += tx.amount;
                if is_today {
                    stats.today_expense += tx.amount;
                }
                if is_month {
                    stats.month_expense += tx.amount;
                }
                if is_year {
                    stats.year_expense += tx.amount;
                }

                accumulate(&mut category_totals, &tx.category, tx.amount, |c| {
                    &c.category
                });
                accumulate(&mut contributor_totals, &tx.user_name, tx.amount, |c| {
                    &c.name
                });
            }
        }

        if is_year {
            let bucket = &mut monthly[tx.date.month0() as usize];
            match tx.kind {
                TransactionKind::Income => bucket.income += tx.amount,
                TransactionKind::Expense => bucket.expense += tx.amount,
            }
        }
    }

    stats.balance = stats.total_income - stats.total_expense;

    // Descending by amount; name order breaks ties deterministically
    sort_descending(&mut category_totals, |c| &c.category);
    category_totals.truncate(TOP_CATEGORIES);
    sort_descending(&mut contributor_totals, |c| &c.name);

    DashboardReport {
        stats,
        monthly,
        categories: category_totals,
        contributors: contributor_totals,
    }
}

fn accumulate<T, F>(totals: &mut Vec<T>, key: &str, amount: f64, key_of: F)
where
    T: BreakdownEntry,
    F: Fn(&T) -> &str,
{
    match totals.iter_mut().find(|entry| key_of(entry) == key) {
        Some(entry) => *entry.amount_mut() += amount,
        None => totals.push(T::new(key, amount)),
    }
}

fn sort_descending<T: BreakdownEntry, F: Fn(&T) -> &str>(totals: &mut [T], key_of: F) {
    totals.sort_by(|a, b| {
        b.amount()
            .partial_cmp(&a.amount())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| key_of(a).cmp(key_of(b)))
    });
}

trait BreakdownEntry {
    fn new(key: &str, amount: f64) -> Self;
    fn amount(&self) -> f64;
    fn amount_mut(&mut self) -> &mut f64;
}

impl BreakdownEntry for CategoryTotal {
    fn new(key: &str, amount: f64) -> Self {
        Self {
            category: key.to_string(),
            amount,
        }
    }
    fn amount(&self) -> f64 {
        self.amount
    }
    fn amount_mut(&mut self) -> &mut f64 {
        &mut self.amount
    }
}

impl BreakdownEntry for ContributorTotal {
    fn new(key: &str, amount: f64) -> Self {
        Self {
            name: key.to_string(),
            amount,
        }
    }
    fn amount(&self) -> f64 {
        self.amount
    }
    fn amount_mut(&mut self) -> &mut f64 {
        &mut self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;
    use chrono::Utc;

    fn tx(
        kind: TransactionKind,
        amount: f64,
        date: NaiveDate,
        category: &str,
        user: &str,
    ) -> Transaction {
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: "u1".to_string(),
            user_name: user.to_string(),
            date,
            kind,
            category: category.to_string(),
            amount,
            payment_method: PaymentMethod::Cash,
            description: None,
            attachment: None,
            bank_account_id: None,
            bank_name: None,
            investment_type: None,
            investors: None,
            created_at: Utc::now(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_list_yields_zeroed_report() {
        let report = compute_dashboard(&[], day(2026, 6, 15));
        assert_eq!(report.stats.balance, 0.0);
        assert_eq!(report.monthly.len(), 12);
        assert!(report.categories.is_empty());
        assert!(report.contributors.is_empty());
    }

    #[test]
    fn test_same_day_income_and_expense_buckets() {
        let today = day(2026, 8, 30);
        let txs = vec![
            tx(TransactionKind::Expense, 100.0, today, "Food", "Asha"),
            tx(TransactionKind::Income, 500.0, today, "Sales", "Asha"),
        ];

        let report = compute_dashboard(&txs, today);
        assert_eq!(report.stats.balance, 400.0);
        assert_eq!(report.stats.today_expense, 100.0);
        assert_eq!(report.stats.today_income, 500.0);
        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.categories[0].category, "Food");
        assert_eq!(report.categories[0].amount, 100.0);
    }

    #[test]
    fn test_balance_identity() {
        let as_of = day(2026, 5, 1);
        let txs = vec![
            tx(TransactionKind::Income, 1200.5, day(2025, 12, 31), "Sales", "A"),
            tx(TransactionKind::Expense, 300.25, day(2026, 1, 2), "Rent", "B"),
            tx(TransactionKind::Expense, 99.75, day(2026, 5, 1), "Food", "A"),
            tx(TransactionKind::Income, 10.0, day(2026, 5, 20), "Interest", "B"),
        ];
        let report = compute_dashboard(&txs, as_of);
        assert_eq!(
            report.stats.balance,
            report.stats.total_income - report.stats.total_expense
        );
    }

    #[test]
    fn test_month_bucket_requires_same_month_and_year() {
        let as_of = day(2026, 3, 10);
        let txs = vec![
            // same month, same year: counted
            tx(TransactionKind::Expense, 10.0, day(2026, 3, 1), "Food", "A"),
            // same month, previous year: excluded from month and year buckets
            tx(TransactionKind::Expense, 20.0, day(2025, 3, 1), "Food", "A"),
            // different month, same year: year bucket only
            tx(TransactionKind::Expense, 40.0, day(2026, 7, 1), "Food", "A"),
        ];
        let report = compute_dashboard(&txs, as_of);
        assert_eq!(report.stats.month_expense, 10.0);
        assert_eq!(report.stats.year_expense, 50.0);
        assert_eq!(report.stats.total_expense, 70.0);
    }

    #[test]
    fn test_monthly_series_always_twelve_entries_jan_to_dec() {
        let as_of = day(2026, 2, 1);
        let txs = vec![
            tx(TransactionKind::Income, 75.0, day(2026, 11, 3), "Sales", "A"),
            tx(TransactionKind::Expense, 5.0, day(2026, 1, 9), "Food", "A"),
            // previous year never lands in the series
            tx(TransactionKind::Income, 999.0, day(2025, 6, 1), "Sales", "A"),
        ];
        let report = compute_dashboard(&txs, as_of);

        assert_eq!(report.monthly.len(), 12);
        let labels: Vec<&str> = report.monthly.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, MONTH_LABELS.to_vec());
        assert_eq!(report.monthly[0].expense, 5.0);
        assert_eq!(report.monthly[10].income, 75.0);
        assert_eq!(report.monthly[5].income, 0.0);
    }

    #[test]
    fn test_category_breakdown_top_six_descending() {
        let as_of = day(2026, 4, 1);
        let mut txs = Vec::new();
        for (i, name) in ["A", "B", "C", "D", "E", "F", "G", "H"].iter().enumerate() {
            txs.push(tx(
                TransactionKind::Expense,
                (i + 1) as f64 * 10.0,
                day(2026, 4, 1),
                name,
                "Asha",
            ));
        }
        let report = compute_dashboard(&txs, as_of);

        assert_eq!(report.categories.len(), 6);
        assert_eq!(report.categories[0].category, "H");
        assert_eq!(report.categories[0].amount, 80.0);
        for pair in report.categories.windows(2) {
            assert!(pair[0].amount >= pair[1].amount);
        }
        // The two smallest categories fell off
        assert!(!report.categories.iter().any(|c| c.category == "A"));
        assert!(!report.categories.iter().any(|c| c.category == "B"));
    }

    #[test]
    fn test_contributors_keyed_by_recorder_not_investors() {
        let as_of = day(2026, 4, 2);
        let mut team_tx = tx(TransactionKind::Expense, 90.0, as_of, "Gear", "Asha");
        team_tx.investors = Some(vec!["Ravi".to_string(), "Meera".to_string()]);

        let txs = vec![
            team_tx,
            tx(TransactionKind::Expense, 30.0, as_of, "Food", "Ravi"),
            tx(TransactionKind::Income, 500.0, as_of, "Sales", "Meera"),
        ];
        let report = compute_dashboard(&txs, as_of);

        // Income never counts; investor names never appear as contributors
        assert_eq!(report.contributors.len(), 2);
        assert_eq!(report.contributors[0].name, "Asha");
        assert_eq!(report.contributors[0].amount, 90.0);
        assert_eq!(report.contributors[1].name, "Ravi");
        assert_eq!(report.contributors[1].amount, 30.0);
    }

    #[test]
    fn test_ties_broken_by_name_deterministically() {
        let as_of = day(2026, 4, 2);
        let txs = vec![
            tx(TransactionKind::Expense, 50.0, as_of, "Zeta", "A"),
            tx(TransactionKind::Expense, 50.0, as_of, "Alpha", "A"),
        ];
        let a = compute_dashboard(&txs, as_of);
        let b = compute_dashboard(&txs, as_of);
        assert_eq!(a.categories, b.categories);
        assert_eq!(a.categories[0].category, "Alpha");
    }

    #[test]
    fn test_later_as_of_changes_bucket_membership() {
        let date = day(2026, 8, 30);
        let txs = vec![tx(TransactionKind::Income, 100.0, date, "Sales", "A")];

        let same_day = compute_dashboard(&txs, date);
        assert_eq!(same_day.stats.today_income, 100.0);

        let next_month = compute_dashboard(&txs, day(2026, 9, 15));
        assert_eq!(next_month.stats.today_income, 0.0);
        assert_eq!(next_month.stats.month_income, 0.0);
        assert_eq!(next_month.stats.year_income, 100.0);
        assert_eq!(next_month.stats.total_income, 100.0);
    }
}
