// Domain layer: core models and ports (interfaces) shared by the guard, router and client.

pub mod model;
pub mod ports;
pub mod token;
