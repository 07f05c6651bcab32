// lib.rs
// Personal debt tracker: debts owed to/by the user, installment ledgers and
// aggregate balances, persisted write-through to a local key-value store.
//
// The presentation layer drives everything through `state::AppState`:
// - login / logout / change_password      (session gate)
// - create / update / delete / toggle_paid (debt store)
// - toggle_payment / set_custom_amount / reset_to_even (installment ledger)
// - list / aggregate_balances              (read side)

pub mod config;
pub mod error;
pub mod input;
pub mod ledger;
pub mod models;
pub mod session;
pub mod state;
pub mod storage;

pub use config::Config;
pub use error::{DebtError, Result};
pub use state::{AppState, init_state};

/// Installs a fmt subscriber filtered by `Config::log_filter`.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
