use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/overview", get(handlers::get_overview))
        .route("/api/budget", post(handlers::set_budget))
        .route("/api/payday", post(handlers::set_payday))
        .route("/api/transactions", post(handlers::record_transaction))
        .route("/api/transactions/:id", delete(handlers::reverse_transaction))
        .route("/api/archive", post(handlers::archive_period))
        .route("/api/fixed-expenses", post(handlers::add_fixed_expense))
        .route("/api/fixed-expenses/:id", delete(handlers::remove_fixed_expense))
        .route("/api/theme", put(handlers::set_theme))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/reminder", get(handlers::get_reminder))
        .route("/api/admin/stats", get(handlers::admin_stats))
        .with_state(state)
}
