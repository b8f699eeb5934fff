/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! REST client for the hosted auth provider.
//!
//! The provider owns sign-up, sign-in, OAuth, and token refresh; this
//! client only forwards the documented calls and maps HTTP errors to
//! [`AuthError`]. Session persistence is deliberately not done here — the
//! [`AuthBridge`](crate::AuthBridge) routes it through the cookie store.

use crate::error::AuthError;
use confab_types::{AuthSession, AuthUser, UserMetadata};
use serde_json::json;

/// OAuth identity providers offered on the sign-in page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Github,
    Google,
    Discord,
    Apple,
}

impl OAuthProvider {
    pub const ALL: [OAuthProvider; 4] = [
        OAuthProvider::Github,
        OAuthProvider::Google,
        OAuthProvider::Discord,
        OAuthProvider::Apple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Github => "github",
            OAuthProvider::Google => "google",
            OAuthProvider::Discord => "discord",
            OAuthProvider::Apple => "apple",
        }
    }
}

/// The provider operations the bridge consumes.
///
/// Kept as a trait so the bridge's session state machine is testable
/// against an in-process fake.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Create an account; the deployment auto-confirms, so a session is
    /// returned immediately.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthSession, AuthError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    /// Convert the one-time `?code=` from the OAuth redirect into a session.
    async fn exchange_code_for_session(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<AuthSession, AuthError>;

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    async fn update_user_metadata(
        &self,
        access_token: &str,
        metadata: &UserMetadata,
    ) -> Result<AuthUser, AuthError>;

    /// The browser navigation target that starts an OAuth flow; the
    /// provider redirects back to `redirect_to` with a `?code=` parameter.
    fn authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> String;
}

/// GoTrue-compatible REST client.
#[derive(Debug, Clone)]
pub struct GoTrueClient {
    base_url: String,
    anon_key: String,
    http: reqwest::Client,
}

impl GoTrueClient {
    /// `base_url` is the provider origin, e.g. `https://auth.confab.example`.
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.url(path))
            .header("apikey", &self.anon_key)
    }
}

impl AuthApi for GoTrueClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthSession, AuthError> {
        let mut body = json!({ "email": email, "password": password });
        if let Some(name) = name {
            body["data"] = json!({ "name": name });
        }
        let response = self.post("/signup").json(&body).send().await?;
        parse_session(response).await
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let response = self
            .post("/token?grant_type=password")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        parse_session(response).await
    }

    async fn exchange_code_for_session(
        &self,
        code: &str,
        code_verifier: Option<&str>,
    ) -> Result<AuthSession, AuthError> {
        let response = self
            .post("/token?grant_type=pkce")
            .json(&json!({
                "auth_code": code,
                "code_verifier": code_verifier.unwrap_or_default(),
            }))
            .send()
            .await?;
        parse_session(response).await
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let response = self
            .http
            .get(self.url("/user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        parse_json(response).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self.post("/logout").bearer_auth(access_token).send().await?;
        match response.status().as_u16() {
            200..=299 => Ok(()),
            401 => Err(AuthError::NotAuthenticated),
            status => Err(provider_error(status, response).await),
        }
    }

    async fn update_user_metadata(
        &self,
        access_token: &str,
        metadata: &UserMetadata,
    ) -> Result<AuthUser, AuthError> {
        let response = self
            .http
            .put(self.url("/user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .json(&json!({ "data": metadata }))
            .send()
            .await?;
        parse_json(response).await
    }

    fn authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> String {
        format!(
            "{}?provider={}&redirect_to={}",
            self.url("/authorize"),
            provider.as_str(),
            urlencoding::encode(redirect_to)
        )
    }
}

async fn parse_session(response: reqwest::Response) -> Result<AuthSession, AuthError> {
    parse_json(response).await
}

async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AuthError> {
    match response.status().as_u16() {
        200..=299 => Ok(response.json::<T>().await?),
        401 => Err(AuthError::NotAuthenticated),
        status => Err(provider_error(status, response).await),
    }
}

/// Pull the human-readable message out of a GoTrue error body, which uses
/// `error_description`, `msg`, or `message` depending on the endpoint.
async fn provider_error(status: u16, response: reqwest::Response) -> AuthError {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            ["error_description", "msg", "message"]
                .iter()
                .find_map(|k| v.get(k).and_then(|m| m.as_str()).map(String::from))
        })
        .unwrap_or(body);
    AuthError::Provider { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_carries_provider_and_encoded_redirect() {
        let client = GoTrueClient::new("https://auth.confab.example/", "anon");
        let url = client.authorize_url(
            OAuthProvider::Github,
            "https://app.confab.example/auth/callback",
        );
        assert_eq!(
            url,
            "https://auth.confab.example/auth/v1/authorize?provider=github\
             &redirect_to=https%3A%2F%2Fapp.confab.example%2Fauth%2Fcallback"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = GoTrueClient::new("https://auth.confab.example///", "anon");
        assert_eq!(
            client.url("/user"),
            "https://auth.confab.example/auth/v1/user"
        );
    }
}
