use crate::config::ClientConfig;
use crate::core::routes::RouteDescriptor;
use crate::core::{Location, TokenStore};
use crate::domain::model::login_redirect_url;
use crate::domain::token;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    /// Abort the transition and go here instead.
    Redirect(String),
}

/// Keeps unauthenticated users out of routes flagged `requires_auth`.
///
/// The guard never fails: a store that cannot be read counts as "no token".
pub struct AuthGuard {
    store: Arc<dyn TokenStore>,
    token_key: String,
    login_route: String,
    redirect_param: String,
}

impl AuthGuard {
    pub fn new(store: Arc<dyn TokenStore>, config: &ClientConfig) -> Self {
        Self {
            store,
            token_key: config.token_key.clone(),
            login_route: config.login_route.clone(),
            redirect_param: config.redirect_param.clone(),
        }
    }

    pub fn check(&self, to: &RouteDescriptor, target: &Location) -> GuardDecision {
        if !to.requires_auth {
            return GuardDecision::Proceed;
        }

        if token::is_authenticated(self.store.as_ref(), &self.token_key) {
            return GuardDecision::Proceed;
        }

        tracing::debug!("No credential token for {}, redirecting to login", target);
        GuardDecision::Redirect(login_redirect_url(
            &self.login_route,
            &self.redirect_param,
            &target.full_path(),
        ))
    }

    /// Continuation form of [`AuthGuard::check`]; `next` runs exactly once.
    pub fn before_each<F>(&self, to: &RouteDescriptor, target: &Location, from: &Location, next: F)
    where
        F: FnOnce(GuardDecision),
    {
        tracing::trace!("Guarding {} -> {}", from, target);
        next(self.check(to, target));
    }
}
