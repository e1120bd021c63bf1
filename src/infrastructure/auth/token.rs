//! HMAC-signed session tokens
//!
//! Format: `<expires>.<nonce>.<mac>` where `expires` is epoch milliseconds,
//! `nonce` is 16 random bytes hex-encoded and `mac` is the hex HMAC-SHA256 of
//! `<expires>.<nonce>` under the signer's secret.

use std::fmt::Debug;
use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};
use serde::Serialize;
use sha2::Sha256;

use crate::domain::DomainError;

type HmacSha256 = Hmac<Sha256>;

const NONCE_BYTES: usize = 16;
const GENERATED_SECRET_LEN: usize = 48;

/// A freshly signed token and its expiry (epoch ms)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires: i64,
}

/// Signs and verifies session tokens with a shared secret
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
    ttl: Duration,
}

impl Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[hidden]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Random alphanumeric secret, used when none is configured
    pub fn generate_secret() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_SECRET_LEN)
            .map(char::from)
            .collect()
    }

    pub fn issue(&self) -> Result<IssuedToken, DomainError> {
        self.issue_at(Utc::now().timestamp_millis())
    }

    pub(crate) fn issue_at(&self, now_ms: i64) -> Result<IssuedToken, DomainError> {
        let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        let expires = now_ms.saturating_add(ttl_ms);

        let mut nonce = [0u8; NONCE_BYTES];
        rand::thread_rng().fill_bytes(&mut nonce);

        let payload = format!("{}.{}", expires, hex::encode(nonce));
        let mac = self.sign(&payload)?;

        Ok(IssuedToken {
            token: format!("{}.{}", payload, mac),
            expires,
        })
    }

    /// True when the token is well formed, signed with this secret and not
    /// yet expired
    pub fn verify(&self, token: &str) -> bool {
        self.verify_at(token, Utc::now().timestamp_millis())
    }

    pub(crate) fn verify_at(&self, token: &str, now_ms: i64) -> bool {
        let mut parts = token.split('.');

        let (Some(expires), Some(nonce), Some(mac), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        let Ok(expires_ms) = expires.parse::<i64>() else {
            return false;
        };

        if nonce.len() != NONCE_BYTES * 2 || hex::decode(nonce).is_err() {
            return false;
        }

        let Ok(expected) = self.sign(&format!("{}.{}", expires, nonce)) else {
            return false;
        };

        constant_time_compare(&expected, mac) && now_ms < expires_ms
    }

    fn sign(&self, payload: &str) -> Result<String, DomainError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| DomainError::internal(format!("Invalid signing key: {}", e)))?;
        mac.update(payload.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Constant-time string comparison to prevent timing attacks
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
