pub mod auth;
pub mod client;
pub mod guard;
pub mod router;
pub mod routes;

pub use crate::domain::model::{Location, Session, User};
pub use crate::domain::ports::{LocationProvider, Navigator, TokenStore};
pub use crate::utils::error::Result;
