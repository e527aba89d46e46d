//! Service account credentials and OAuth access tokens.
//!
//! Access tokens are minted with the JWT bearer grant: a short-lived RS256
//! assertion signed with the service account key is exchanged at the key's
//! token endpoint for an access token scoped to `cloud-platform`.

use std::fs;
use std::path::Path;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::AuditError;

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECONDS: i64 = 3600;

/// The fields of a service account JSON key file needed to mint tokens.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, AuditError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AuditError::Credentials(format!("cannot read {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
            .map_err(|e| AuditError::Credentials(format!("{} ({})", e, path.display())))
    }

    pub fn parse(content: &str) -> Result<Self, AuditError> {
        let key: Self = serde_json::from_str(content)
            .map_err(|e| AuditError::Credentials(format!("invalid service account key: {}", e)))?;

        // Fail early on a key jsonwebtoken cannot use.
        EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| AuditError::Credentials(format!("invalid private key: {}", e)))?;

        Ok(key)
    }

    /// Builds the signed JWT assertion for the token exchange.
    pub fn assertion(&self, issued_at: i64) -> Result<String, AuditError> {
        #[derive(Debug, Serialize)]
        struct Claims<'a> {
            iss: &'a str,
            scope: &'a str,
            aud: &'a str,
            iat: i64,
            exp: i64,
        }

        let claims = Claims {
            iss: &self.client_email,
            scope: CLOUD_PLATFORM_SCOPE,
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECONDS,
        };

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| AuditError::Credentials(format!("invalid private key: {}", e)))?;

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| AuditError::Operational(format!("cannot sign token assertion: {}", e)))
    }
}

/// Source of OAuth access tokens for the Google APIs.
pub trait TokenSource {
    fn access_token(&self) -> Result<String, AuditError>;
}

/// Mints access tokens from a service account key.
pub struct ServiceAccountTokenSource {
    key: ServiceAccountKey,
    agent: ureq::Agent,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ServiceAccountTokenSource {
    pub fn new(key: ServiceAccountKey, agent: ureq::Agent) -> Self {
        Self { key, agent }
    }
}

impl TokenSource for ServiceAccountTokenSource {
    fn access_token(&self) -> Result<String, AuditError> {
        let assertion = self.key.assertion(Utc::now().timestamp())?;

        debug!(
            "Requesting access token for {} from {}",
            self.key.client_email, self.key.token_uri
        );

        let mut response = self
            .agent
            .post(&self.key.token_uri)
            .send_form([("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .map_err(|e| AuditError::Operational(format!("token exchange failed: {}", e)))?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| AuditError::Operational(format!("cannot read token response: {}", e)))?;

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuditError::Operational(format!("malformed token response: {}", e)))?;

        Ok(token.access_token)
    }
}
