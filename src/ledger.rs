//! Commands that mutate a single [`Account`].
//!
//! Every command validates first and mutates second, so a rejected command
//! leaves the account exactly as it was. The running-balance invariant is
//! `remaining_budget == initial_budget + sum(signed transaction amounts)`.

use crate::models::{
    Account, ArchiveSummary, DEFAULT_CATEGORY, DEFAULT_DESCRIPTION, FixedExpense, NewFixedExpense,
    NewTransaction, Theme, Transaction,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Largest amount a single transaction, budget or fixed expense may carry.
/// Keeps every sum the ledger and the reports compute far inside `Decimal`.
pub fn max_amount() -> Decimal {
    Decimal::new(1_000_000_000_000_000, 0)
}

impl Account {
    pub fn record_transaction(
        &mut self,
        request: NewTransaction,
        now: NaiveDateTime,
    ) -> Result<&Transaction, LedgerError> {
        validate_amount(request.amount, "amount")?;

        let transaction = Transaction {
            id: Uuid::new_v4(),
            amount: request.amount,
            description: non_blank(request.description, DEFAULT_DESCRIPTION),
            category: non_blank(request.category, DEFAULT_CATEGORY),
            is_income: request.is_income,
            timestamp: now,
        };
        let remaining = in_range(self.remaining_budget.checked_add(transaction.signed_amount()))?;
        check_headroom(remaining, self.total_fixed()?)?;

        self.remaining_budget = remaining;
        self.update_streak(now.date());
        self.transactions.push(transaction);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Removes a transaction and undoes its effect on the balance.
    pub fn reverse_transaction(&mut self, id: Uuid) -> Result<Transaction, LedgerError> {
        let index = self
            .transactions
            .iter()
            .position(|transaction| transaction.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("transaction {id}")))?;
        let remaining = in_range(
            self.remaining_budget
                .checked_sub(self.transactions[index].signed_amount()),
        )?;
        check_headroom(remaining, self.total_fixed()?)?;

        self.remaining_budget = remaining;
        Ok(self.transactions.remove(index))
    }

    /// Starts a fresh period with a new budget. History is cleared; fixed
    /// expenses and savings are kept.
    pub fn set_budget(
        &mut self,
        initial_budget: Decimal,
        target_payday: Option<u32>,
    ) -> Result<(), LedgerError> {
        validate_amount(initial_budget, "budget")?;
        if let Some(day) = target_payday {
            validate_payday(day)?;
        }
        check_headroom(initial_budget, self.total_fixed()?)?;

        self.initial_budget = initial_budget;
        self.remaining_budget = initial_budget;
        self.transactions.clear();
        if let Some(day) = target_payday {
            self.target_payday = day;
        }
        Ok(())
    }

    pub fn set_payday(&mut self, target_payday: u32) -> Result<(), LedgerError> {
        validate_payday(target_payday)?;
        self.target_payday = target_payday;
        Ok(())
    }

    /// Moves what is left of the period into savings and starts over with the
    /// same budget. Not idempotent: each call archives again.
    pub fn archive_period(&mut self) -> Result<ArchiveSummary, LedgerError> {
        // An overspent period saves nothing; savings never go down.
        let saved = self.remaining_budget.max(Decimal::ZERO);
        let total_savings = in_range(self.total_savings.checked_add(saved))?;
        check_headroom(self.initial_budget, self.total_fixed()?)?;

        self.total_savings = total_savings;
        self.months_archived = self.months_archived.saturating_add(1);
        self.remaining_budget = self.initial_budget;
        self.transactions.clear();

        Ok(ArchiveSummary {
            saved,
            total_savings: self.total_savings,
            months_archived: self.months_archived,
            remaining_budget: self.remaining_budget,
        })
    }

    pub fn add_fixed_expense(&mut self, request: NewFixedExpense) -> Result<&FixedExpense, LedgerError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidInput("fixed expense needs a name".into()));
        }
        validate_amount(request.monthly_amount, "monthly amount")?;
        let total_fixed = in_range(self.total_fixed()?.checked_add(request.monthly_amount))?;
        check_headroom(self.remaining_budget, total_fixed)?;

        self.fixed_expenses.push(FixedExpense {
            id: Uuid::new_v4(),
            name: name.to_string(),
            monthly_amount: request.monthly_amount,
        });
        Ok(&self.fixed_expenses[self.fixed_expenses.len() - 1])
    }

    pub fn remove_fixed_expense(&mut self, id: Uuid) -> Result<FixedExpense, LedgerError> {
        let index = self
            .fixed_expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("fixed expense {id}")))?;
        Ok(self.fixed_expenses.remove(index))
    }

    pub fn total_fixed(&self) -> Result<Decimal, LedgerError> {
        self.fixed_expenses
            .iter()
            .try_fold(Decimal::ZERO, |total, expense| {
                in_range(total.checked_add(expense.monthly_amount))
            })
    }

    /// Counts consecutive active days. Runs at most once per calendar day.
    pub fn update_streak(&mut self, today: NaiveDate) {
        if self.last_active_date == Some(today) {
            return;
        }

        let yesterday = today - Duration::days(1);
        self.streak = if self.last_active_date == Some(yesterday) {
            self.streak.saturating_add(1)
        } else {
            1
        };
        self.last_active_date = Some(today);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

fn validate_amount(amount: Decimal, what: &str) -> Result<(), LedgerError> {
    if amount < Decimal::ZERO {
        Err(LedgerError::InvalidInput(format!("{what} must not be negative")))
    } else if amount > max_amount() {
        Err(LedgerError::InvalidInput(format!("{what} must not exceed {}", max_amount())))
    } else {
        Ok(())
    }
}

pub(crate) fn in_range(value: Option<Decimal>) -> Result<Decimal, LedgerError> {
    value.ok_or_else(|| LedgerError::InvalidInput("amount out of range".into()))
}

/// The daily limit is computed from `remaining - fixed`; that has to stay
/// representable.
fn check_headroom(remaining: Decimal, total_fixed: Decimal) -> Result<(), LedgerError> {
    in_range(remaining.checked_sub(total_fixed)).map(|_| ())
}

fn validate_payday(day: u32) -> Result<(), LedgerError> {
    if (1..=31).contains(&day) {
        Ok(())
    } else {
        Err(LedgerError::InvalidInput(format!("payday must be between 1 and 31, got {day}")))
    }
}

fn non_blank(value: Option<String>, fallback: &str) -> String {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn spend(amount: i64) -> NewTransaction {
        NewTransaction {
            amount: Decimal::from(amount),
            description: Some("Coffee".into()),
            category: None,
            is_income: false,
        }
    }

    fn income(amount: i64) -> NewTransaction {
        NewTransaction {
            is_income: true,
            ..spend(amount)
        }
    }

    fn balance_holds(account: &Account) -> bool {
        let signed: Decimal = account.transactions.iter().map(Transaction::signed_amount).sum();
        account.remaining_budget == account.initial_budget + signed
    }

    #[test]
    fn record_applies_signed_delta_and_defaults() {
        let mut account = Account::new(Decimal::from(1000), 25);
        let recorded = account.record_transaction(spend(150), at(2024, 5, 1)).unwrap().clone();
        assert_eq!(recorded.category, DEFAULT_CATEGORY);
        assert_eq!(recorded.description, "Coffee");
        assert_eq!(recorded.timestamp, at(2024, 5, 1));

        account.record_transaction(income(40), at(2024, 5, 1)).unwrap();
        assert_eq!(account.remaining_budget, Decimal::from(890));
        assert_eq!(account.transactions.len(), 2);
        assert!(balance_holds(&account));
    }

    #[test]
    fn blank_description_gets_placeholder() {
        let mut account = Account::new(Decimal::from(100), 25);
        let request = NewTransaction {
            description: Some("   ".into()),
            ..spend(1)
        };
        let recorded = account.record_transaction(request, at(2024, 5, 1)).unwrap();
        assert_eq!(recorded.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn negative_amount_is_rejected_without_mutation() {
        let mut account = Account::new(Decimal::from(100), 25);
        let before = account.clone();
        let err = account.record_transaction(spend(-5), at(2024, 5, 1)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        assert_eq!(account, before);
    }

    #[test]
    fn reverse_is_exact_inverse_of_record() {
        for request in [spend(75), income(75), spend(0)] {
            let mut account = Account::new(Decimal::from(500), 25);
            account.record_transaction(spend(20), at(2024, 5, 1)).unwrap();
            let before = account.remaining_budget;

            let id = account.record_transaction(request, at(2024, 5, 2)).unwrap().id;
            account.reverse_transaction(id).unwrap();

            assert_eq!(account.remaining_budget, before);
            assert_eq!(account.transactions.len(), 1);
            assert!(balance_holds(&account));
        }
    }

    #[test]
    fn reversing_unknown_id_is_not_found() {
        let mut account = Account::new(Decimal::from(500), 25);
        account.record_transaction(spend(20), at(2024, 5, 1)).unwrap();
        let before = account.clone();

        let err = account.reverse_transaction(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
        assert_eq!(account, before);
    }

    #[test]
    fn set_budget_clears_history_but_keeps_fixed_expenses() {
        let mut account = Account::new(Decimal::from(500), 25);
        account.record_transaction(spend(20), at(2024, 5, 1)).unwrap();
        account
            .add_fixed_expense(NewFixedExpense {
                name: "Rent".into(),
                monthly_amount: Decimal::from(300),
            })
            .unwrap();
        account.total_savings = Decimal::from(7);

        account.set_budget(Decimal::from(9000), Some(10)).unwrap();
        assert_eq!(account.initial_budget, Decimal::from(9000));
        assert_eq!(account.remaining_budget, Decimal::from(9000));
        assert_eq!(account.target_payday, 10);
        assert!(account.transactions.is_empty());
        assert_eq!(account.fixed_expenses.len(), 1);
        assert_eq!(account.total_savings, Decimal::from(7));
    }

    #[test]
    fn set_budget_validates_before_mutating() {
        let mut account = Account::new(Decimal::from(500), 25);
        let before = account.clone();
        assert!(account.set_budget(Decimal::from(-1), None).is_err());
        assert!(account.set_budget(Decimal::from(100), Some(40)).is_err());
        assert!(account.set_payday(0).is_err());
        assert_eq!(account, before);
    }

    #[test]
    fn archiving_twice_counts_twice() {
        let mut account = Account::new(Decimal::from(1000), 25);
        account.record_transaction(spend(400), at(2024, 5, 1)).unwrap();

        let first = account.archive_period().unwrap();
        assert_eq!(first.saved, Decimal::from(600));
        assert_eq!(account.total_savings, Decimal::from(600));
        assert_eq!(account.months_archived, 1);
        assert_eq!(account.remaining_budget, Decimal::from(1000));
        assert!(account.transactions.is_empty());

        let second = account.archive_period().unwrap();
        assert_eq!(second.saved, Decimal::from(1000));
        assert_eq!(account.total_savings, Decimal::from(1600));
        assert_eq!(account.months_archived, 2);
    }

    #[test]
    fn overspent_period_archives_nothing() {
        let mut account = Account::new(Decimal::from(100), 25);
        account.record_transaction(spend(250), at(2024, 5, 1)).unwrap();
        let summary = account.archive_period().unwrap();
        assert_eq!(summary.saved, Decimal::ZERO);
        assert_eq!(account.total_savings, Decimal::ZERO);
        assert_eq!(account.months_archived, 1);
    }

    #[test]
    fn fixed_expenses_do_not_touch_balance() {
        let mut account = Account::new(Decimal::from(1000), 25);
        let rent = account
            .add_fixed_expense(NewFixedExpense {
                name: " Rent ".into(),
                monthly_amount: Decimal::from(300),
            })
            .unwrap()
            .clone();
        account
            .add_fixed_expense(NewFixedExpense {
                name: "Phone".into(),
                monthly_amount: Decimal::from(50),
            })
            .unwrap();

        assert_eq!(rent.name, "Rent");
        assert_eq!(account.total_fixed().unwrap(), Decimal::from(350));
        assert_eq!(account.remaining_budget, Decimal::from(1000));

        account.remove_fixed_expense(rent.id).unwrap();
        assert_eq!(account.total_fixed().unwrap(), Decimal::from(50));
        assert!(matches!(
            account.remove_fixed_expense(rent.id),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn fixed_expense_requires_name() {
        let mut account = Account::new(Decimal::from(1000), 25);
        let err = account
            .add_fixed_expense(NewFixedExpense {
                name: "  ".into(),
                monthly_amount: Decimal::from(10),
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        assert!(account.fixed_expenses.is_empty());
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let mut account = Account::default();
        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();

        account.update_streak(day(1));
        assert_eq!(account.streak, 1);
        account.update_streak(day(1));
        assert_eq!(account.streak, 1);
        account.update_streak(day(2));
        assert_eq!(account.streak, 2);
        account.update_streak(day(3));
        assert_eq!(account.streak, 3);

        account.update_streak(day(5));
        assert_eq!(account.streak, 1);
        assert_eq!(account.last_active_date, Some(day(5)));
    }

    #[test]
    fn recording_updates_streak() {
        let mut account = Account::new(Decimal::from(100), 25);
        account.record_transaction(spend(1), at(2024, 5, 1)).unwrap();
        account.record_transaction(spend(1), at(2024, 5, 1)).unwrap();
        account.record_transaction(spend(1), at(2024, 5, 2)).unwrap();
        assert_eq!(account.streak, 2);
    }

    #[test]
    fn amounts_beyond_the_cap_are_rejected() {
        let huge: Decimal = "70000000000000000000000000000".parse().unwrap();
        let mut account = Account::new(Decimal::from(1000), 25);
        let before = account.clone();

        let request = NewTransaction {
            amount: huge,
            ..spend(0)
        };
        assert!(matches!(
            account.record_transaction(request, at(2024, 5, 1)),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(matches!(
            account.add_fixed_expense(NewFixedExpense {
                name: "Yacht".into(),
                monthly_amount: huge,
            }),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(account.set_budget(huge, None).is_err());
        assert_eq!(account, before);

        account.record_transaction(spend(0), at(2024, 5, 1)).unwrap();
        let at_cap = NewTransaction {
            amount: max_amount(),
            ..spend(0)
        };
        assert!(account.record_transaction(at_cap, at(2024, 5, 1)).is_ok());
    }

    #[test]
    fn overflowing_balances_are_rejected_without_mutation() {
        let mut account = Account::new(Decimal::from(1000), 25);
        account.remaining_budget = Decimal::MAX;
        let before = account.clone();
        assert!(matches!(
            account.record_transaction(income(1), at(2024, 5, 1)),
            Err(LedgerError::InvalidInput(_))
        ));
        assert_eq!(account, before);

        account.remaining_budget = Decimal::MIN;
        let before = account.clone();
        assert!(matches!(
            account.add_fixed_expense(NewFixedExpense {
                name: "Rent".into(),
                monthly_amount: Decimal::from(1),
            }),
            Err(LedgerError::InvalidInput(_))
        ));
        assert_eq!(account, before);

        account.total_savings = Decimal::MAX;
        account.remaining_budget = Decimal::from(5);
        let before = account.clone();
        assert!(account.archive_period().is_err());
        assert_eq!(account, before);
    }
}
