//! Feature modules. Each one has a `controller` (HTTP handlers), a `router`
//! and, where there is business logic, a `service`.

pub mod auth;
pub mod campaigns;
pub mod health;
pub mod users;
