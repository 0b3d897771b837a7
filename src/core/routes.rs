use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum View {
    Home,
    Timestamp,
    JsonValidator,
    EncodeConverter,
    FileMd5,
    IpChecker,
    CronParser,
    DataConstruction,
    Login,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: String,
    pub view: View,
    pub requires_auth: bool,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: View) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view,
            requires_auth: false,
        }
    }

    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}

/// Immutable after construction; shared read-only by the router and its guard.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// The tool collection's routes, with the login page mounted at `login_route`.
    pub fn standard(login_route: &str) -> Self {
        Self::new(vec![
            RouteDescriptor::new("/", "Home", View::Home),
            RouteDescriptor::new("/timestamp", "Timestamp", View::Timestamp),
            RouteDescriptor::new("/json", "JsonValidator", View::JsonValidator),
            RouteDescriptor::new("/encode", "EncodeConverter", View::EncodeConverter),
            RouteDescriptor::new("/md5", "FileMD5", View::FileMd5),
            RouteDescriptor::new("/ip", "IPChecker", View::IpChecker),
            RouteDescriptor::new("/cron", "CronParser", View::CronParser),
            RouteDescriptor::new("/data-construction", "DataConstruction", View::DataConstruction)
                .requires_auth(),
            RouteDescriptor::new(login_route, "Login", View::Login),
        ])
    }

    /// Matches a path, ignoring any query and a trailing slash.
    pub fn resolve(&self, path: &str) -> Option<&RouteDescriptor> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        self.routes.iter().find(|route| route.path == path)
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|route| route.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
