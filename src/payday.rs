use crate::ledger::LedgerError;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Resolves the business day a target payday actually lands on.
///
/// `month` is 1-based. Months past December roll into the following year and
/// days past the end of the month roll into the next month, so
/// `(2024, 2, 31)` is treated as March 2nd before the weekend shift.
/// Saturdays and Sundays move back to the preceding Friday.
pub fn resolve_payday(year: i32, month: u32, target_day: u32) -> Result<NaiveDate, LedgerError> {
    if !(1..=31).contains(&target_day) {
        return Err(LedgerError::InvalidInput(format!(
            "payday must be between 1 and 31, got {target_day}"
        )));
    }
    if month == 0 {
        return Err(LedgerError::InvalidInput("month must be 1-based".into()));
    }

    let year = year + ((month - 1) / 12) as i32;
    let month = (month - 1) % 12 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LedgerError::InvalidInput(format!("invalid date {year}-{month:02}")))?;
    let date = first + Duration::days(i64::from(target_day) - 1);

    Ok(match date.weekday() {
        Weekday::Sun => date - Duration::days(2),
        Weekday::Sat => date - Duration::days(1),
        _ => date,
    })
}
