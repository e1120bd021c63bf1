//! Credential check for the gallery admin login

use thiserror::Error;
use tracing::{info, warn};

use super::token::{constant_time_compare, IssuedToken, TokenSigner};
use crate::config::AuthSettings;
use crate::domain::DomainError;

/// Login failures, each with a fixed HTTP status
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Login is not configured")]
    NotConfigured,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Internal(#[from] DomainError),
}

impl LoginError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingCredentials => 400,
            Self::NotConfigured => 503,
            Self::InvalidCredentials => 401,
            Self::Internal(_) => 500,
        }
    }
}

/// Checks submitted credentials against the configured pair and issues tokens
#[derive(Debug, Clone)]
pub struct LoginService {
    user: Option<String>,
    password: Option<String>,
    signer: TokenSigner,
}

impl LoginService {
    pub fn new(user: Option<String>, password: Option<String>, signer: TokenSigner) -> Self {
        Self {
            user,
            password,
            signer,
        }
    }

    /// Builds the service from settings. Without a configured secret a random
    /// one is generated, so tokens only verify within this process.
    pub fn from_settings(settings: &AuthSettings) -> Self {
        let secret = match &settings.secret {
            Some(secret) => secret.clone(),
            None => {
                warn!("AUTH_SECRET is not set, using a generated per-process token secret");
                TokenSigner::generate_secret()
            }
        };

        Self::new(
            settings.user.clone(),
            settings.password.clone(),
            TokenSigner::new(secret, settings.token_ttl),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.user.is_some() && self.password.is_some()
    }

    pub fn login(&self, user: &str, password: &str) -> Result<IssuedToken, LoginError> {
        if user.is_empty() || password.is_empty() {
            return Err(LoginError::MissingCredentials);
        }

        let (Some(expected_user), Some(expected_password)) = (&self.user, &self.password) else {
            warn!("Login attempted but no credentials are configured");
            return Err(LoginError::NotConfigured);
        };

        // Evaluate both to keep timing independent of which one differs
        let user_ok = constant_time_compare(user, expected_user);
        let password_ok = constant_time_compare(password, expected_password);

        if !(user_ok && password_ok) {
            warn!("Rejected login with invalid credentials");
            return Err(LoginError::InvalidCredentials);
        }

        let issued = self.signer.issue()?;
        info!(expires = issued.expires, "Issued login token");

        Ok(issued)
    }

    pub fn verify(&self, token: &str) -> bool {
        self.signer.verify(token)
    }
}
