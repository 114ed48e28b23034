use rust_decimal::Decimal;
use std::{env, path::PathBuf, str::FromStr};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    /// Admin routes are closed when unset.
    pub admin_token: Option<String>,
    pub default_budget: Decimal,
    pub default_payday: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            data_path: PathBuf::from("data/state.json"),
            admin_token: None,
            default_budget: Decimal::from(12000),
            default_payday: 25,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: parse_var::<u16>("PORT").unwrap_or(defaults.port),
            data_path: env::var("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            admin_token: env::var("ADMIN_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            default_budget: parse_var::<Decimal>("DEFAULT_BUDGET")
                .filter(|budget| *budget >= Decimal::ZERO)
                .unwrap_or(defaults.default_budget),
            default_payday: parse_var::<u32>("DEFAULT_PAYDAY")
                .filter(|day| (1..=31).contains(day))
                .unwrap_or(defaults.default_payday),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("ignoring unparsable {name}={value}");
            None
        }
    }
}
