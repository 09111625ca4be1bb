//! Popcorn Core — shared identifiers and abstractions.
//!
//! This crate defines the identifier newtypes, the error taxonomy and the
//! random source abstraction that the initiative context and its hosts
//! depend on. It contains no infrastructure code.

pub mod caller;
pub mod command;
pub mod error;
pub mod ids;
pub mod rng;
