use crate::models::{Account, AdminStats, AppData, CategoryTotal, DailyPoint, StatsResponse, WeeklyPoint};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub fn build_stats_at(today: NaiveDate, account: &Account) -> StatsResponse {
    const WEEK_COUNT: usize = 8;

    let mut days: BTreeMap<NaiveDate, (Decimal, Decimal, usize)> = BTreeMap::new();
    let mut categories: BTreeMap<&str, Decimal> = BTreeMap::new();
    for transaction in &account.transactions {
        let entry = days.entry(transaction.timestamp.date()).or_default();
        if transaction.is_income {
            entry.1 = entry.1.saturating_add(transaction.amount);
        } else {
            entry.0 = entry.0.saturating_add(transaction.amount);
            let category = categories.entry(transaction.category.as_str()).or_default();
            *category = category.saturating_add(transaction.amount);
        }
        entry.2 += 1;
    }
    let day = |date: NaiveDate| days.get(&date).copied().unwrap_or_default();

    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        let (spent, income, _) = day(date);
        last_7_days.push(DailyPoint {
            date: date.to_string(),
            spent,
            income,
            net: income.saturating_sub(spent),
        });
    }
    let weekly_spent = last_7_days
        .iter()
        .fold(Decimal::ZERO, |total, point| total.saturating_add(point.spent));

    let current_week_start = week_start(today);
    let mut weekly_totals = Vec::with_capacity(WEEK_COUNT);
    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let mut spent = Decimal::ZERO;
        let mut income = Decimal::ZERO;
        let mut transaction_count = 0;
        for day_offset in 0..7 {
            let (day_spent, day_income, count) = day(start + Duration::days(day_offset));
            spent = spent.saturating_add(day_spent);
            income = income.saturating_add(day_income);
            transaction_count += count;
        }

        weekly_totals.push(WeeklyPoint {
            week: week_label(start),
            start_date: start.to_string(),
            end_date: end.to_string(),
            spent,
            income,
            transaction_count,
        });
    }

    let mut by_category: Vec<CategoryTotal> = categories
        .into_iter()
        .map(|(category, spent)| CategoryTotal {
            category: category.to_string(),
            spent,
        })
        .collect();
    by_category.sort_by(|a, b| b.spent.cmp(&a.spent));

    StatsResponse {
        last_7_days,
        weekly_totals,
        by_category,
        weekly_spent,
        streak: account.streak,
    }
}

pub fn build_admin_stats(today: NaiveDate, data: &AppData) -> AdminStats {
    let accounts = data.accounts.values();
    AdminStats {
        accounts: data.accounts.len(),
        transactions: accounts.clone().map(|account| account.transactions.len()).sum(),
        fixed_expenses: accounts.clone().map(|account| account.fixed_expenses.len()).sum(),
        total_savings: accounts
            .clone()
            .fold(Decimal::ZERO, |total, account| total.saturating_add(account.total_savings)),
        active_today: accounts
            .filter(|account| account.last_active_date == Some(today))
            .count(),
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;

    fn record(account: &mut Account, date: NaiveDate, amount: i64, category: &str, is_income: bool) {
        account
            .record_transaction(
                NewTransaction {
                    amount: Decimal::from(amount),
                    description: None,
                    category: Some(category.into()),
                    is_income,
                },
                date.and_hms_opt(10, 0, 0).unwrap(),
            )
            .unwrap();
    }

    #[test]
    fn last_7_days_sums_each_day() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let two_days_ago = today - Duration::days(2);
        let mut account = Account::new(Decimal::from(1000), 25);
        record(&mut account, two_days_ago, 30, "Food", false);
        record(&mut account, two_days_ago, 20, "Food", false);
        record(&mut account, two_days_ago, 100, "Gift", true);
        record(&mut account, today - Duration::days(20), 999, "Food", false);

        let stats = build_stats_at(today, &account);
        assert_eq!(stats.last_7_days.len(), 7);
        let point = stats
            .last_7_days
            .iter()
            .find(|day| day.date == two_days_ago.to_string())
            .expect("missing day");
        assert_eq!(point.spent, Decimal::from(50));
        assert_eq!(point.income, Decimal::from(100));
        assert_eq!(point.net, Decimal::from(50));
        assert_eq!(stats.weekly_spent, Decimal::from(50));
    }

    #[test]
    fn weekly_series_and_categories() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let mut account = Account::new(Decimal::from(1000), 25);
        record(&mut account, today, 10, "Transport", false);
        record(&mut account, today, 70, "Food", false);
        record(&mut account, today - Duration::days(1), 5, "Transport", false);

        let stats = build_stats_at(today, &account);
        assert_eq!(stats.weekly_totals.len(), 8);
        // 2026-01-05 is a Monday, so only today falls in the current week
        let current = stats.weekly_totals.last().unwrap();
        assert_eq!(current.start_date, "2026-01-05");
        assert_eq!(current.spent, Decimal::from(80));
        assert_eq!(current.transaction_count, 2);

        assert_eq!(stats.by_category[0].category, "Food");
        assert_eq!(stats.by_category[1].spent, Decimal::from(15));
    }

    #[test]
    fn admin_stats_aggregates_accounts() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let mut active = Account::new(Decimal::from(100), 25);
        record(&mut active, today, 10, "Food", false);
        let mut saver = Account::new(Decimal::from(100), 25);
        saver.archive_period().unwrap();

        let mut data = AppData::default();
        data.accounts.insert("a".into(), active);
        data.accounts.insert("b".into(), saver);

        let stats = build_admin_stats(today, &data);
        assert_eq!(stats.accounts, 2);
        assert_eq!(stats.transactions, 1);
        assert_eq!(stats.total_savings, Decimal::from(100));
        assert_eq!(stats.active_today, 1);
    }
}
