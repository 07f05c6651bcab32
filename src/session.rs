// session.rs
// Session gate: a UI lock that must be open before any command runs.
// Lives only in memory, so it closes when the session ends.

use crate::error::{DebtError, Result};

#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    authenticated: bool,
}

impl SessionGate {
    pub fn is_open(&self) -> bool {
        self.authenticated
    }

    pub fn require(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(DebtError::Locked)
        }
    }

    pub(crate) fn open(&mut self) {
        self.authenticated = true;
    }

    pub(crate) fn close(&mut self) {
        self.authenticated = false;
    }
}
