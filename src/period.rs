use crate::ledger::{LedgerError, in_range};
use crate::models::{Account, Overview, ReminderState};
use crate::payday::resolve_payday;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub daily_limit: i64,
    pub days_left: i64,
    pub payday_date: NaiveDate,
}

/// Works out the active pay period and what can be spent per day until it ends.
///
/// The period ends at 23:59:59 on the resolved payday. Once that moment has
/// passed the next month's payday is used instead. `days_left` never drops
/// below one, so the limit on payday itself is the whole remainder.
pub fn compute_period(
    now: NaiveDateTime,
    target_payday: u32,
    remaining_budget: Decimal,
    total_fixed: Decimal,
) -> Result<Period, LedgerError> {
    let mut payday = resolve_payday(now.year(), now.month(), target_payday)?;
    if now >= end_of_day(payday) {
        payday = resolve_payday(now.year(), now.month() + 1, target_payday)?;
    }

    let millis = (end_of_day(payday) - now).num_milliseconds();
    let days_left = ceil_div(millis, MILLIS_PER_DAY).max(1);

    let available = in_range(remaining_budget.checked_sub(total_fixed))?;
    let daily_limit = (available / Decimal::from(days_left))
        .floor()
        .to_i64()
        .ok_or_else(|| LedgerError::InvalidInput("daily limit out of range".into()))?;

    Ok(Period {
        daily_limit,
        days_left,
        payday_date: payday,
    })
}

/// Share of the budget already used, clamped to `0..=100`. A zero budget
/// reports 0.
pub fn used_percent(initial_budget: Decimal, remaining_budget: Decimal) -> f64 {
    if initial_budget.is_zero() {
        return 0.0;
    }
    let used = initial_budget
        .checked_sub(remaining_budget)
        .and_then(|spent| spent.checked_div(initial_budget))
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED));
    match used {
        Some(used) => used
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0),
        None if remaining_budget < initial_budget => 100.0,
        None => 0.0,
    }
}

pub fn build_overview(account: &Account, now: NaiveDateTime) -> Result<Overview, LedgerError> {
    let total_fixed = account.total_fixed()?;
    let period = compute_period(now, account.target_payday, account.remaining_budget, total_fixed)?;

    Ok(Overview {
        daily_limit: period.daily_limit,
        days_left: period.days_left,
        payday_date: period.payday_date,
        remaining_budget: account.remaining_budget,
        initial_budget: account.initial_budget,
        used_percent: used_percent(account.initial_budget, account.remaining_budget),
        total_fixed,
        target_payday: account.target_payday,
        transactions: account.transactions.clone(),
        fixed_expenses: account.fixed_expenses.clone(),
        total_savings: account.total_savings,
        months_archived: account.months_archived,
        streak: account.streak,
        theme: account.theme,
    })
}

/// Read-only snapshot for a scheduled reminder sweep. Nothing is mutated; the
/// scheduler decides what to send.
pub fn compute_reminder_state(account: &Account, now: NaiveDateTime) -> Result<ReminderState, LedgerError> {
    let period = compute_period(
        now,
        account.target_payday,
        account.remaining_budget,
        account.total_fixed()?,
    )?;

    let today = now.date();
    let spent_today: Decimal = account
        .transactions
        .iter()
        .filter(|transaction| !transaction.is_income && transaction.timestamp.date() == today)
        .fold(Decimal::ZERO, |total, transaction| total.saturating_add(transaction.amount));
    let active_today = account.last_active_date == Some(today);

    Ok(ReminderState {
        daily_limit: period.daily_limit,
        days_left: period.days_left,
        spent_today,
        streak: account.streak,
        active_today,
        should_remind: !active_today,
    })
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::default()) + Duration::days(1) - Duration::seconds(1)
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value.div_euclid(divisor);
    if value.rem_euclid(divisor) == 0 { quotient } else { quotient + 1 }
}
