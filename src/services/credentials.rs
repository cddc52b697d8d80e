//! Service-account key loading
//!
//! The key is read from a local JSON file first. If that fails for any
//! reason, the named environment variable is parsed as the JSON document.

use crate::types::{CredentialSource, PagestatsError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Google's OAuth2 token endpoint, used when the key omits `token_uri`
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service-account key document this tool needs
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

/// Parse a key document
pub fn parse_key(content: &str) -> Result<ServiceAccountKey> {
    Ok(serde_json::from_str(content)?)
}

/// Load the key from `source.key_file`, falling back to `source.env_var`
pub fn load_key(source: &CredentialSource) -> Result<ServiceAccountKey> {
    load_key_with(source, |name| std::env::var(name).ok())
}

/// Same as [`load_key`] with an injectable environment lookup
pub fn load_key_with<F>(source: &CredentialSource, env_lookup: F) -> Result<ServiceAccountKey>
where
    F: Fn(&str) -> Option<String>,
{
    let file_err = match load_key_file(&source.key_file) {
        Ok(key) => {
            tracing::info!(path = %source.key_file.display(), "loaded service-account key from file");
            return Ok(key);
        }
        Err(e) => e,
    };
    tracing::debug!(
        path = %source.key_file.display(),
        error = %file_err,
        "key file unusable, trying environment"
    );

    let content = env_lookup(&source.env_var).ok_or_else(|| {
        PagestatsError::Credentials(format!(
            "{}: {}; ${} is not set",
            source.key_file.display(),
            file_err,
            source.env_var
        ))
    })?;

    let key = parse_key(&content).map_err(|e| {
        PagestatsError::Credentials(format!(
            "{}: {}; ${} is not a valid key: {}",
            source.key_file.display(),
            file_err,
            source.env_var,
            e
        ))
    })?;

    tracing::info!(var = %source.env_var, "loaded service-account key from environment");
    Ok(key)
}

fn load_key_file(path: &Path) -> Result<ServiceAccountKey> {
    let content = fs::read_to_string(path)?;
    parse_key(&content)
}
