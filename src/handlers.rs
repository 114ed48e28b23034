use crate::auth::{AdminGuard, Principal};
use crate::errors::AppError;
use crate::ledger::LedgerError;
use crate::models::{
    Account, AdminStats, ArchiveSummary, BudgetRequest, FixedExpense, NewFixedExpense, NewTransaction,
    Overview, PaydayRequest, ReminderState, StatsResponse, ThemeRequest, Transaction,
};
use crate::period::{build_overview, compute_reminder_state};
use crate::state::AppState;
use crate::stats::{build_admin_stats, build_stats_at};
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDateTime};
use tracing::info;
use uuid::Uuid;

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn get_overview(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Overview>, AppError> {
    let account = read_account(&state, &principal).await;
    Ok(Json(build_overview(&account, now())?))
}

pub async fn set_budget(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<BudgetRequest>, JsonRejection>,
) -> Result<Json<Overview>, AppError> {
    let Json(request) = payload?;
    let overview = with_account(&state, &principal, |account| {
        account.set_budget(request.initial_budget, request.target_payday)?;
        build_overview(account, now())
    })
    .await?;

    info!(user = principal.as_str(), budget = %request.initial_budget, "budget set");
    Ok(Json(overview))
}

pub async fn set_payday(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<PaydayRequest>, JsonRejection>,
) -> Result<Json<Overview>, AppError> {
    let Json(request) = payload?;
    let overview = with_account(&state, &principal, |account| {
        account.set_payday(request.target_payday)?;
        build_overview(account, now())
    })
    .await?;

    info!(user = principal.as_str(), payday = request.target_payday, "payday set");
    Ok(Json(overview))
}

pub async fn record_transaction(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<NewTransaction>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let Json(request) = payload?;
    let transaction = with_account(&state, &principal, |account| {
        account.record_transaction(request, now()).cloned()
    })
    .await?;

    info!(
        user = principal.as_str(),
        id = %transaction.id,
        amount = %transaction.amount,
        income = transaction.is_income,
        "transaction recorded"
    );
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn reverse_transaction(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<Overview>, AppError> {
    let overview = with_account(&state, &principal, |account| {
        account.reverse_transaction(id)?;
        build_overview(account, now())
    })
    .await?;

    info!(user = principal.as_str(), %id, "transaction reversed");
    Ok(Json(overview))
}

pub async fn archive_period(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<ArchiveSummary>, AppError> {
    let summary = with_account(&state, &principal, |account| account.archive_period()).await?;

    info!(
        user = principal.as_str(),
        saved = %summary.saved,
        months = summary.months_archived,
        "period archived"
    );
    Ok(Json(summary))
}

pub async fn add_fixed_expense(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<NewFixedExpense>, JsonRejection>,
) -> Result<(StatusCode, Json<FixedExpense>), AppError> {
    let Json(request) = payload?;
    let expense = with_account(&state, &principal, |account| {
        account.add_fixed_expense(request).cloned()
    })
    .await?;

    info!(user = principal.as_str(), id = %expense.id, name = %expense.name, "fixed expense added");
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn remove_fixed_expense(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    with_account(&state, &principal, |account| account.remove_fixed_expense(id)).await?;

    info!(user = principal.as_str(), %id, "fixed expense removed");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_theme(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<ThemeRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    with_account(&state, &principal, |account| {
        account.set_theme(request.theme);
        Ok(())
    })
    .await?;

    info!(user = principal.as_str(), theme = ?request.theme, "theme set");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_stats(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<StatsResponse>, AppError> {
    let account = read_account(&state, &principal).await;
    Ok(Json(build_stats_at(now().date(), &account)))
}

pub async fn get_reminder(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<ReminderState>, AppError> {
    let account = read_account(&state, &principal).await;
    Ok(Json(compute_reminder_state(&account, now())?))
}

pub async fn admin_stats(
    _admin: AdminGuard,
    State(state): State<AppState>,
) -> Result<Json<AdminStats>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_admin_stats(now().date(), &data)))
}

/// Snapshot of the caller's account. Unknown principals see a fresh account
/// that is only stored once they change something.
async fn read_account(state: &AppState, principal: &Principal) -> Account {
    let data = state.data.lock().await;
    data.accounts.get(principal.as_str()).cloned().unwrap_or_else(|| {
        Account::new(state.config.default_budget, state.config.default_payday)
    })
}

/// One read-modify-write against the caller's account. The lock is held until
/// the document is saved. On any failure the in-memory account is put back,
/// including dropping an account this call would have created.
async fn with_account<T>(
    state: &AppState,
    principal: &Principal,
    op: impl FnOnce(&mut Account) -> Result<T, LedgerError>,
) -> Result<T, AppError> {
    let key = principal.as_str();
    let mut data = state.data.lock().await;
    let previous = data.accounts.get(key).cloned();

    let outcome = op(state.account_mut(&mut data, key));
    let result = match outcome {
        Ok(output) => persist_data(&state.config.data_path, &data).await.map(|()| output),
        Err(err) => Err(err.into()),
    };
    if result.is_err() {
        match previous {
            Some(account) => data.accounts.insert(key.to_string(), account),
            None => data.accounts.remove(key),
        };
    }
    result
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
