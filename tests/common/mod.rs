#![allow(dead_code)]

use chrono::NaiveDate;
use tempfile::TempDir;

use debtbook::{
    AppState, Config,
    models::{DebtForm, DebtType},
    storage::FileStorage,
};

pub const PASSWORD: &str = "123456";

pub struct TestContext {
    pub state: AppState,
    pub dir: TempDir,
}

impl TestContext {
    /// Re-opens the same data directory, as a fresh session would.
    pub fn reopen(&self) -> AppState {
        open_state(&self.dir)
    }
}

pub fn config_for(dir: &TempDir) -> Config {
    Config {
        data_dir: dir.path().to_path_buf(),
        ..Config::default()
    }
}

pub fn open_state(dir: &TempDir) -> AppState {
    let config = config_for(dir);
    let storage = FileStorage::open(&config.data_dir).expect("open file storage");
    AppState::open(config, Box::new(storage)).expect("open state")
}

/// Fresh store in a temp directory with the session already unlocked.
pub fn setup_state() -> TestContext {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut state = open_state(&dir);
    state.login(PASSWORD).expect("login with default password");
    TestContext { state, dir }
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn form(debt_type: DebtType, name: &str, amount: &str, date: NaiveDate) -> DebtForm {
    DebtForm {
        debt_type,
        person_name: name.to_string(),
        amount: amount.to_string(),
        date,
        notes: None,
        installment_months: None,
    }
}

pub fn installment_form(
    debt_type: DebtType,
    name: &str,
    amount: &str,
    date: NaiveDate,
    months: u32,
) -> DebtForm {
    DebtForm {
        installment_months: Some(months),
        ..form(debt_type, name, amount, date)
    }
}
