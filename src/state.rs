use crate::config::Config;
use crate::models::{Account, AppData};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(config: Config, data: AppData) -> Self {
        Self {
            config: Arc::new(config),
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Account for `owner`, created with the configured defaults on first use.
    pub fn account_mut<'a>(&self, data: &'a mut AppData, owner: &str) -> &'a mut Account {
        data.accounts.entry(owner.to_string()).or_insert_with(|| {
            tracing::info!(user = owner, "creating account");
            Account::new(self.config.default_budget, self.config.default_payday)
        })
    }
}
