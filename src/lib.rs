pub mod app;
pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod payday;
pub mod period;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use ledger::LedgerError;
pub use state::AppState;
pub use storage::load_data;
