use crate::core::guard::{AuthGuard, GuardDecision};
use crate::core::routes::{RouteDescriptor, RouteTable, View};
use crate::core::{Location, LocationProvider, Navigator};
use crate::utils::error::NavigationError;
use std::sync::{Mutex, MutexGuard};

const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationReport {
    pub requested: Location,
    pub landed: Location,
    pub view: View,
    pub redirected: bool,
}

#[derive(Debug)]
struct RouterState {
    current: Location,
    history: Vec<Location>,
}

/// Resolves transitions against the route table, running the guard before each one.
pub struct Router {
    table: RouteTable,
    guard: AuthGuard,
    state: Mutex<RouterState>,
}

impl Router {
    /// Starts on `/` with empty history.
    pub fn new(table: RouteTable, guard: AuthGuard) -> Self {
        Self {
            table,
            guard,
            state: Mutex::new(RouterState {
                current: Location::parse("/"),
                history: Vec::new(),
            }),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn current(&self) -> Location {
        self.state().current.clone()
    }

    pub fn current_route(&self) -> Option<RouteDescriptor> {
        self.table.resolve(&self.current().path).cloned()
    }

    pub fn navigate(&self, target: &str) -> Result<NavigationReport, NavigationError> {
        let requested = Location::parse(target);
        let mut pending = requested.clone();
        let mut redirected = false;

        for _ in 0..=MAX_REDIRECTS {
            let route = self
                .table
                .resolve(&pending.path)
                .ok_or_else(|| NavigationError::NotFound(pending.full_path()))?;

            let from = self.current();
            if pending == from {
                return Err(NavigationError::Duplicated(pending.full_path()));
            }

            let mut decision = GuardDecision::Proceed;
            self.guard
                .before_each(route, &pending, &from, |next| decision = next);

            match decision {
                GuardDecision::Proceed => {
                    tracing::debug!("Navigated {} -> {}", from, pending);
                    let view = route.view;
                    let mut state = self.state();
                    let previous = std::mem::replace(&mut state.current, pending.clone());
                    state.history.push(previous);

                    return Ok(NavigationReport {
                        requested,
                        landed: pending,
                        view,
                        redirected,
                    });
                }
                GuardDecision::Redirect(next) => {
                    tracing::info!("Navigation to {} redirected to {}", pending, next);
                    pending = Location::parse(&next);
                    redirected = true;
                }
            }
        }

        Err(NavigationError::RedirectLoop(requested.full_path()))
    }

    /// Returns to the previous location without re-running the guard.
    pub fn back(&self) -> Option<Location> {
        let mut state = self.state();
        let previous = state.history.pop()?;
        state.current = previous.clone();
        Some(previous)
    }

    fn state(&self) -> MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for Router {
    fn push(&self, target: &str) -> Result<(), NavigationError> {
        self.navigate(target).map(|_| ())
    }
}

impl LocationProvider for Router {
    fn current(&self) -> Location {
        Router::current(self)
    }

    fn assign(&self, href: &str) -> Result<(), NavigationError> {
        self.push(href)
    }
}
