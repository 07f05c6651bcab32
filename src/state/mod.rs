// state module: AppState, initialization, and re-exports of submodules.
//
// Every mutating command works on a copy of the collection and only swaps it
// in after the write-through succeeds, so a failed command changes nothing.

use tracing::{debug, warn};

use crate::{
    config::Config,
    error::Result,
    models::{Debt, DebtFilter},
    session::SessionGate,
    storage::{FileStorage, Storage},
};

mod auth;
mod debts;
mod installments;

pub use auth::MIN_PASSWORD_LEN;
pub use debts::{MAX_AMOUNT, MAX_INSTALLMENT_MONTHS, aggregate, filter_debts};

pub struct AppState {
    debts: Vec<Debt>,
    storage: Box<dyn Storage>,
    config: Config,
    session: SessionGate,
    filter: DebtFilter,
    editing: Option<String>,
}

/// Opens the file-backed store described by the environment.
pub fn init_state() -> anyhow::Result<AppState> {
    let config = Config::from_env()?;
    let storage = FileStorage::open(&config.data_dir)?;
    Ok(AppState::open(config, Box::new(storage))?)
}

impl AppState {
    /// Loads the debt document from `storage`; a missing slot is an empty book.
    pub fn open(config: Config, storage: Box<dyn Storage>) -> Result<Self> {
        let debts = load_debts(storage.as_ref(), &config.debts_key)?;
        debug!(count = debts.len(), "debts loaded");
        Ok(Self {
            debts,
            storage,
            config,
            session: SessionGate::default(),
            filter: DebtFilter::default(),
            editing: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    pub fn filter(&self) -> DebtFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: DebtFilter) {
        self.filter = filter;
    }

    /// Debt currently loaded into the form, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Applies `f` to a working copy of the collection, persists the result,
    /// then commits it in memory.
    fn mutate<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Debt>) -> Result<T>,
    {
        self.session.require()?;
        let mut next = self.debts.clone();
        let out = f(&mut next)?;
        save_debts(self.storage.as_mut(), &self.config.debts_key, &next)?;
        self.debts = next;
        Ok(out)
    }
}

pub(crate) fn load_debts(storage: &dyn Storage, key: &str) -> Result<Vec<Debt>> {
    let Some(raw) = storage.get(key)? else {
        return Ok(Vec::new());
    };
    let mut debts: Vec<Debt> = serde_json::from_str(&raw)?;
    for debt in &mut debts {
        debt.notes = crate::input::clean_opt(debt.notes.take());
        if let Some(ledger) = debt.installment.as_mut() {
            if ledger.ensure_initialized() {
                warn!(debt_id = %debt.id, "installment arrays repaired on load");
            }
        }
    }
    Ok(debts)
}

pub(crate) fn save_debts(storage: &mut dyn Storage, key: &str, debts: &[Debt]) -> Result<()> {
    let document = serde_json::to_string(debts)?;
    storage.set(key, &document)?;
    debug!(count = debts.len(), "debts saved");
    Ok(())
}
