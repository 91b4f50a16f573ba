//! Business logic services.
//!
//! Services sit between the HTTP handlers and the repositories: handlers
//! hand them validated wire data plus the caller's [`Identity`], services
//! enforce the domain rules and talk to the store.
//!
//! [`Identity`]: crate::models::user::Identity

pub mod auth;
pub mod orders;
pub mod token;
