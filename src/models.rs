use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Current on-disk shape of [`Account`]. Older documents load with missing
/// fields defaulted and are rewritten at this version on the next save.
pub const ACCOUNT_VERSION: u32 = 2;

pub const DEFAULT_DESCRIPTION: &str = "Transaction";
pub const DEFAULT_CATEGORY: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub is_income: bool,
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    /// Effect of this transaction on the remaining budget.
    pub fn signed_amount(&self) -> Decimal {
        if self.is_income { self.amount } else { -self.amount }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: Uuid,
    pub name: String,
    pub monthly_amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub version: u32,
    pub initial_budget: Decimal,
    pub remaining_budget: Decimal,
    pub target_payday: u32,
    pub transactions: Vec<Transaction>,
    pub fixed_expenses: Vec<FixedExpense>,
    pub total_savings: Decimal,
    pub months_archived: u32,
    pub streak: u32,
    pub last_active_date: Option<NaiveDate>,
    pub theme: Theme,
}

impl Account {
    pub fn new(initial_budget: Decimal, target_payday: u32) -> Self {
        Self {
            initial_budget,
            remaining_budget: initial_budget,
            target_payday,
            ..Self::default()
        }
    }
}

impl Default for Account {
    fn default() -> Self {
        Self {
            version: ACCOUNT_VERSION,
            initial_budget: Decimal::ZERO,
            remaining_budget: Decimal::ZERO,
            target_payday: 25,
            transactions: Vec::new(),
            fixed_expenses: Vec::new(),
            total_savings: Decimal::ZERO,
            months_archived: 0,
            streak: 0,
            last_active_date: None,
            theme: Theme::default(),
        }
    }
}

/// Whole persisted document: one account per authenticated principal.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub accounts: BTreeMap<String, Account>,
}

#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    pub initial_budget: Decimal,
    pub target_payday: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PaydayRequest {
    pub target_payday: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub is_income: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewFixedExpense {
    pub name: String,
    pub monthly_amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: Theme,
}

/// Everything the page needs to render the current period.
#[derive(Debug, Serialize, Deserialize)]
pub struct Overview {
    pub daily_limit: i64,
    pub days_left: i64,
    pub payday_date: NaiveDate,
    pub remaining_budget: Decimal,
    pub initial_budget: Decimal,
    pub used_percent: f64,
    pub total_fixed: Decimal,
    pub target_payday: u32,
    pub transactions: Vec<Transaction>,
    pub fixed_expenses: Vec<FixedExpense>,
    pub total_savings: Decimal,
    pub months_archived: u32,
    pub streak: u32,
    pub theme: Theme,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArchiveSummary {
    pub saved: Decimal,
    pub total_savings: Decimal,
    pub months_archived: u32,
    pub remaining_budget: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReminderState {
    pub daily_limit: i64,
    pub days_left: i64,
    pub spent_today: Decimal,
    pub streak: u32,
    pub active_today: bool,
    pub should_remind: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub spent: Decimal,
    pub income: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyPoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub spent: Decimal,
    pub income: Decimal,
    pub transaction_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub spent: Decimal,
}

/// Derived summary handed to the reminder/email side.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub last_7_days: Vec<DailyPoint>,
    pub weekly_totals: Vec<WeeklyPoint>,
    pub by_category: Vec<CategoryTotal>,
    pub weekly_spent: Decimal,
    pub streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminStats {
    pub accounts: usize,
    pub transactions: usize,
    pub fixed_expenses: usize,
    pub total_savings: Decimal,
    pub active_today: usize,
}
