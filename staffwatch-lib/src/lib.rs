//! Staffwatch API client library
//!
//! A small async client for the workforce-management REST API: paginated
//! listings, organization membership, an explicitly constructed [`Session`]
//! and the [`RouteGuard`] that decides whether a route may be shown.

pub mod envelope;
pub mod error;
pub mod guard;
pub mod model;
pub mod query;
pub mod session;

mod client;

pub use client::*;
pub use envelope::{Listing, Page};
pub use error::ApiError;
pub use guard::{GuardDecision, MembershipSource, RouteGuard};
pub use query::{Direction, ListQuery};
pub use session::Session;
