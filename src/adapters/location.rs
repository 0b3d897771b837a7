use crate::core::{Location, LocationProvider};
use crate::utils::error::NavigationError;
use std::sync::Mutex;

/// A location with no router behind it. `assign` swaps the whole location,
/// the way setting `window.location.href` does; hash hrefs like `#/login?...`
/// land on the path after the `#`.
#[derive(Debug, Default)]
pub struct HashLocation {
    current: Mutex<Location>,
    assigned: Mutex<Vec<String>>,
}

impl HashLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(target: &str) -> Self {
        Self {
            current: Mutex::new(Location::parse(target)),
            assigned: Mutex::new(Vec::new()),
        }
    }

    /// Every href handed to `assign`, oldest first.
    pub fn assigned(&self) -> Vec<String> {
        self.assigned
            .lock()
            .map(|hrefs| hrefs.clone())
            .unwrap_or_default()
    }
}

impl LocationProvider for HashLocation {
    fn current(&self) -> Location {
        self.current
            .lock()
            .map(|location| location.clone())
            .unwrap_or_default()
    }

    fn assign(&self, href: &str) -> Result<(), NavigationError> {
        let poisoned = || NavigationError::Rejected(href.to_string());

        self.assigned.lock().map_err(|_| poisoned())?.push(href.to_string());
        *self.current.lock().map_err(|_| poisoned())? = Location::parse(href);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_replaces_location() {
        let location = HashLocation::at("/reports?page=2");
        assert_eq!(location.current().full_path(), "/reports?page=2");

        location.assign("#/login?redirect=%2Freports").unwrap();

        assert_eq!(location.current().path, "/login");
        assert_eq!(location.assigned(), vec!["#/login?redirect=%2Freports"]);
    }

    #[test]
    fn test_default_location_is_empty() {
        assert!(HashLocation::new().current().is_empty());
    }
}
