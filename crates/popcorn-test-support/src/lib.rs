//! Shared test mocks and fixtures for Popcorn Initiative.

mod caller;
mod rng;

pub use caller::{manager, player};
pub use rng::{MockRng, SequenceRng};
