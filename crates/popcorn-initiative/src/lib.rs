//! Popcorn Initiative — turn rotation bounded context.
//!
//! Responsible for per-channel player pools, the popcorn turn rotation
//! (current actor, waiting participants, history) and the commands that
//! drive it.

pub mod application;
pub mod domain;
