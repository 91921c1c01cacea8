//! Local checks on the sign-up form.

use std::fmt;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("username is required")]
    MissingUsername,
    #[error("\"{0}\" is not an email address")]
    BadEmail(String),
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    ShortPassword,
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Sign-up data as typed; `validate` runs before anything is sent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    /// Optional; the backend accepts a blank email.
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl NewAccount {
    pub fn new(username: &str, email: &str, password: &str, password_confirm: &str) -> Self {
        Self {
            username: username.trim().to_owned(),
            email: email.trim().to_owned(),
            password: password.to_owned(),
            password_confirm: password_confirm.to_owned(),
        }
    }

    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.username.trim().is_empty() {
            return Err(RegistrationError::MissingUsername);
        }
        if !self.email.is_empty() && !looks_like_email(&self.email) {
            return Err(RegistrationError::BadEmail(self.email.clone()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegistrationError::ShortPassword);
        }
        if self.password != self.password_confirm {
            return Err(RegistrationError::PasswordMismatch);
        }
        Ok(())
    }
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
