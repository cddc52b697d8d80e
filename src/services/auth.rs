//! Service-account authentication
//!
//! Signs an RS256 JWT assertion with the service-account key and exchanges
//! it at the key's token endpoint for a bearer access token.

use crate::services::credentials::ServiceAccountKey;
use crate::types::{PagestatsError, Result};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Read-only reporting scope
pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime in seconds (the token endpoint's maximum)
const ASSERTION_TTL_SECS: i64 = 3600;

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Bearer token for the reporting API
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// JWT claim set for the jwt-bearer grant
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl AssertionClaims {
    pub fn new(key: &ServiceAccountKey, scope: &str, issued_at: i64) -> Self {
        Self {
            iss: key.client_email.clone(),
            scope: scope.to_string(),
            aud: key.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_TTL_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Sign the assertion for `key`
pub fn sign_assertion(key: &ServiceAccountKey, claims: &AssertionClaims) -> Result<String> {
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| PagestatsError::Auth(format!("invalid private key: {}", e)))?;

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    jsonwebtoken::encode(&header, claims, &encoding_key)
        .map_err(|e| PagestatsError::Auth(format!("failed to sign assertion: {}", e)))
}

/// Exchange a signed assertion for an access token
pub fn authorize(key: &ServiceAccountKey, scope: &str) -> Result<AccessToken> {
    let issued_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    let assertion = sign_assertion(key, &AssertionClaims::new(key, scope, issued_at))?;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| PagestatsError::Auth(format!("HTTP client error: {}", e)))?;

    let response = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .map_err(|e| PagestatsError::Auth(format!("token request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(PagestatsError::Auth(format!(
            "token endpoint returned {}: {}",
            status,
            body.trim()
        )));
    }

    let token: TokenResponse = response
        .json()
        .map_err(|e| PagestatsError::Auth(format!("invalid token response: {}", e)))?;

    tracing::info!(
        client_email = %key.client_email,
        expires_in = token.expires_in,
        "obtained access token"
    );
    Ok(AccessToken::new(token.access_token))
}
