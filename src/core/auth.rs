use crate::core::client::ApiClient;
use crate::core::{Location, Session, User};
use crate::domain::token;
use crate::utils::error::{ClientError, Result};
use serde::Deserialize;
use serde_json::json;

const LOGIN_ENDPOINT: &str = "/auth/login";
const REGISTER_ENDPOINT: &str = "/auth/register";
const ME_ENDPOINT: &str = "/auth/me";

/// `{"success": true, "data": ...}`, the backend's success shape.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

impl ApiClient {
    /// Exchanges credentials for a session and stores its token.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        self.open_session(LOGIN_ENDPOINT, username, password).await
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<Session> {
        self.open_session(REGISTER_ENDPOINT, username, password).await
    }

    pub async fn me(&self) -> Result<User> {
        let envelope: Envelope<User> = self.get_json(ME_ENDPOINT).await?;
        Ok(envelope.data)
    }

    /// Forgets the local credential; the backend keeps no session to end.
    pub fn logout(&self) -> Result<()> {
        self.store().remove(&self.config().token_key)
    }

    pub fn is_authenticated(&self) -> bool {
        token::is_authenticated(self.store(), &self.config().token_key)
    }

    async fn open_session(&self, endpoint: &str, username: &str, password: &str) -> Result<Session> {
        let body = json!({ "username": username.trim(), "password": password });
        let envelope: Envelope<Session> = self.post_json(endpoint, &body).await?;
        let session = envelope.data;

        if session.token.trim().is_empty() {
            return Err(ClientError::ResponseError {
                message: format!("{} returned an empty token", endpoint),
            });
        }

        self.store().set(&self.config().token_key, &session.token)?;
        tracing::info!("Logged in as {}", session.user.username);
        Ok(session)
    }

    /// Where to go once logged in: the login page's `redirect` parameter, or the fallback path.
    pub fn redirect_after_login(&self, login_location: &Location) -> String {
        post_login_target(
            login_location,
            &self.config().redirect_param,
            &self.config().fallback_redirect,
        )
    }
}

/// Only in-app paths are honored, so a crafted link cannot bounce the user off-site.
pub fn post_login_target(login_location: &Location, param: &str, fallback: &str) -> String {
    match login_location.query_param(param) {
        Some(target) if target.starts_with('/') && !target.starts_with("//") => target,
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_login_target() {
        let login = Location::parse("/login?redirect=%2Fdata-construction%3Ftab%3Dtasks");
        assert_eq!(
            post_login_target(&login, "redirect", "/data-construction"),
            "/data-construction?tab=tasks"
        );
    }

    #[test]
    fn test_post_login_target_falls_back() {
        let fallback = "/data-construction";
        for href in [
            "/login",
            "/login?redirect=",
            "/login?redirect=https%3A%2F%2Fevil.example",
            "/login?redirect=%2F%2Fevil.example",
        ] {
            assert_eq!(
                post_login_target(&Location::parse(href), "redirect", fallback),
                fallback,
                "{}",
                href
            );
        }
    }
}
