//! Authentication context.
//!
//! Owns the signed-in session and the "sign-in in progress" flag the sign-in
//! screen renders as a spinner. The network call itself is issued by the app
//! through the dispatcher; this type only tracks its lifecycle.

use crate::error::{ApiError, AuthError};
use crate::models::{Credentials, Session};
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct AuthContext {
    loading: bool,
    session: Option<Session>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a sign-in call is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Validate the form and mark the sign-in as started.
    ///
    /// Returns the cleaned-up credentials to send.
    pub fn begin_sign_in(&mut self, email: &str, password: &str) -> Result<Credentials, AuthError> {
        if self.loading {
            return Err(AuthError::Busy);
        }
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        self.loading = true;
        Ok(Credentials::new(email, password))
    }

    /// Record the outcome of the sign-in call. On success the session is
    /// returned so the caller can install its token.
    pub fn finish_sign_in(&mut self, result: Result<Session, ApiError>) -> Result<&Session, ApiError> {
        self.loading = false;
        match result {
            Ok(session) => {
                info!("Signed in as {}", session.email);
                Ok(self.session.insert(session))
            }
            Err(e) => {
                warn!("Sign-in failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Signed out {}", session.email);
        }
    }
}
