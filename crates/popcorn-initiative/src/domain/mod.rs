//! Domain model for the turn rotation context.

pub mod commands;
pub mod initiative;
pub mod manager;
pub mod pool;
