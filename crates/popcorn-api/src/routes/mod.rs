//! Route modules.

pub mod channels;
pub mod health;
