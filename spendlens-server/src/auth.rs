//! Bearer-token verification against an opaque identity provider.
//!
//! The provider is a plain request/response collaborator: token in, user id
//! out. Every failure mode collapses to 401 at the API boundary.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header missing or malformed")]
    MissingBearer,

    #[error("token rejected: {0}")]
    Rejected(String),
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Identity-provider seam. Object-safe so handlers can hold it as
/// `Arc<dyn TokenVerifier>`.
pub trait TokenVerifier: Send + Sync {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<String, AuthError>>;
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Extract and verify the caller's token, returning their user id.
pub async fn verify_bearer(
    headers: &HeaderMap,
    verifier: &dyn TokenVerifier,
) -> Result<String, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::MissingBearer)?;
    verifier.verify(token).await
}

/// Verifier that POSTs `{ "token": ... }` to the provider's verify endpoint
/// and expects `{ "uid": ... }` back.
pub struct HttpTokenVerifier {
    http: reqwest::Client,
    verify_url: String,
}

impl HttpTokenVerifier {
    pub fn new(verify_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            verify_url,
        }
    }
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    token: &'a str,
}

#[derive(Deserialize)]
struct VerifyResponse {
    uid: String,
}

impl TokenVerifier for HttpTokenVerifier {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<String, AuthError>> {
        Box::pin(async move {
            let resp = self
                .http
                .post(&self.verify_url)
                .json(&VerifyRequest { token })
                .send()
                .await
                .map_err(|e| AuthError::Rejected(e.to_string()))?;

            let status = resp.status();
            if !status.is_success() {
                return Err(AuthError::Rejected(format!(
                    "identity provider returned {status}"
                )));
            }

            let out: VerifyResponse = resp
                .json()
                .await
                .map_err(|e| AuthError::Rejected(e.to_string()))?;
            Ok(out.uid)
        })
    }
}
