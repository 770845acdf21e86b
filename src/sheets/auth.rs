use std::fmt;
use std::path::Path;
use std::sync::Arc;

use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use ring::rand::SystemRandom;
use ring::signature::{RsaKeyPair, RSA_PKCS1_SHA256};
use serde::{Deserialize, Serialize};

use crate::error::{CredentialError, LoadError, RemoteAccessError};

/// Read-only access is all the dashboard needs; nothing is written back.
pub const READ_ONLY_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/drive.readonly",
];

/// Anything that can hand out a bearer token for the Sheets API.
pub trait TokenSource {
    fn access_token(&self, http: &Client) -> Result<String, LoadError>;
}

/// A fixed token, for exercising the client without a key.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[cfg(test)]
impl TokenSource for StaticToken {
    fn access_token(&self, _http: &Client) -> Result<String, LoadError> {
        Ok(self.0.clone())
    }
}

// ---------------------------------------------------------------------------
// Service account key
// ---------------------------------------------------------------------------

/// Fields of the JSON key file downloaded from the cloud console.
#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    #[serde(rename = "type")]
    key_type: String,
    #[serde(default)]
    project_id: String,
    private_key: String,
    client_email: String,
    token_uri: String,
}

#[derive(Serialize)]
struct JwtHeader {
    alg: &'static str,
    typ: &'static str,
}

#[derive(Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: u64,
    iat: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Default, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

/// A validated service account: key parsed and ready to sign.
pub struct ServiceAccount {
    client_email: String,
    project_id: String,
    token_uri: String,
    key_pair: RsaKeyPair,
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("project_id", &self.project_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccount {
    pub fn from_path(path: &Path) -> Result<Self, CredentialError> {
        let text = std::fs::read_to_string(path).map_err(|source| CredentialError::Unreadable {
            path: path.to_path_buf(),
            source: Arc::new(source),
        })?;
        Self::try_from_str(&text)
    }

    pub fn try_from_str(input: &str) -> Result<Self, CredentialError> {
        let key: ServiceAccountKey =
            serde_json::from_str(input).map_err(|e| CredentialError::Malformed(Arc::new(e)))?;

        if key.key_type != "service_account" {
            return Err(CredentialError::WrongType(key.key_type));
        }
        if key.client_email.trim().is_empty() {
            return Err(CredentialError::MissingField("client_email"));
        }
        if key.token_uri.trim().is_empty() {
            return Err(CredentialError::MissingField("token_uri"));
        }
        if key.private_key.trim().is_empty() {
            return Err(CredentialError::MissingField("private_key"));
        }

        let key_pair = parse_private_key(&key.private_key)?;

        Ok(Self {
            client_email: key.client_email,
            project_id: key.project_id,
            token_uri: key.token_uri,
            key_pair,
        })
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Build the signed RS256 assertion sent to the token endpoint.
    pub fn signed_assertion(&self) -> Result<String, CredentialError> {
        let now = Utc::now();
        let iat = now.timestamp() as u64;
        let exp = (now + Duration::hours(1)).timestamp() as u64;

        let scope = READ_ONLY_SCOPES.join(" ");
        let claims = JwtClaims {
            iss: &self.client_email,
            scope: &scope,
            aud: &self.token_uri,
            iat,
            exp,
        };
        let header = JwtHeader {
            alg: "RS256",
            typ: "JWT",
        };

        let header_b64 = encode_segment(&header)?;
        let claims_b64 = encode_segment(&claims)?;
        let signing_input = format!("{header_b64}.{claims_b64}");

        let mut signature = vec![0; self.key_pair.public().modulus_len()];
        self.key_pair
            .sign(
                &RSA_PKCS1_SHA256,
                &SystemRandom::new(),
                signing_input.as_bytes(),
                &mut signature,
            )
            .map_err(|_| CredentialError::Signing)?;

        Ok(format!(
            "{signing_input}.{}",
            BASE64_URL_SAFE_NO_PAD.encode(&signature)
        ))
    }
}

impl TokenSource for ServiceAccount {
    /// Exchange a fresh assertion for an access token. Nothing is cached.
    fn access_token(&self, http: &Client) -> Result<String, LoadError> {
        let jwt = self.signed_assertion()?;
        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", jwt.as_str()),
        ];

        log::debug!("requesting access token for {}", self.client_email);
        let resp = http
            .post(&self.token_uri)
            .form(&params)
            .send()
            .map_err(|source| RemoteAccessError::Transport {
                url: self.token_uri.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body: TokenErrorResponse = resp.json().unwrap_or_default();
            let message = if body.error_description.is_empty() {
                body.error
            } else {
                format!("{}: {}", body.error, body.error_description)
            };
            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    RemoteAccessError::Unauthorized(message)
                }
                other => RemoteAccessError::Status {
                    status: other.as_u16(),
                    message,
                },
            }
            .into());
        }

        let token: TokenResponse =
            resp.json()
                .map_err(|source| RemoteAccessError::MalformedResponse {
                    url: self.token_uri.clone(),
                    source,
                })?;
        Ok(token.access_token)
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, CredentialError> {
    let json = serde_json::to_vec(value).map_err(|e| CredentialError::Malformed(Arc::new(e)))?;
    Ok(BASE64_URL_SAFE_NO_PAD.encode(json))
}

fn parse_private_key(pem: &str) -> Result<RsaKeyPair, CredentialError> {
    let mut reader = std::io::Cursor::new(pem.as_bytes());
    let item = rustls_pemfile::read_one(&mut reader)
        .map_err(|e| CredentialError::InvalidKey(e.to_string()))?;
    match item {
        Some(rustls_pemfile::Item::Pkcs8Key(der)) => RsaKeyPair::from_pkcs8(der.secret_pkcs8_der())
            .map_err(|e| CredentialError::InvalidKey(e.to_string())),
        Some(rustls_pemfile::Item::Pkcs1Key(der)) => RsaKeyPair::from_der(der.secret_pkcs1_der())
            .map_err(|e| CredentialError::InvalidKey(e.to_string())),
        Some(_) => Err(CredentialError::InvalidKey(
            "expected an RSA private key".to_string(),
        )),
        None => Err(CredentialError::InvalidKey("no PEM block found".to_string())),
    }
}
