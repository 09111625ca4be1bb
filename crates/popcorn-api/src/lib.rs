//! Popcorn Initiative HTTP host.
//!
//! Exposes the turn rotation commands over HTTP. Callers identify
//! themselves with the `x-actor-id` and `x-actor-roles` headers.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
