// Password gate. The password is a plain string in its own storage slot and
// is compared verbatim: this is a local lock screen, not authentication.

use tracing::{info, warn};

use crate::error::{DebtError, Result};

use super::AppState;

pub const MIN_PASSWORD_LEN: usize = 4;

impl AppState {
    fn current_password(&self) -> Result<String> {
        Ok(self
            .storage
            .get(&self.config.password_key)?
            .unwrap_or_else(|| self.config.default_password.clone()))
    }

    pub fn login(&mut self, password: &str) -> Result<()> {
        if password != self.current_password()? {
            warn!("login rejected");
            return Err(DebtError::InvalidCredentials);
        }
        self.session.open();
        info!("session opened");
        Ok(())
    }

    /// Closes the session and drops any pending edit.
    pub fn logout(&mut self) {
        self.session.close();
        self.editing = None;
        info!("session closed");
    }

    pub fn change_password(&mut self, current: &str, new: &str, confirm: &str) -> Result<()> {
        self.session.require()?;
        if new != confirm {
            return Err(DebtError::validation(
                "new password and confirmation do not match",
            ));
        }
        if current != self.current_password()? {
            warn!("password change rejected");
            return Err(DebtError::InvalidCredentials);
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(DebtError::validation(format!(
                "new password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        self.storage.set(&self.config.password_key, new)?;
        info!("password changed");
        Ok(())
    }
}
