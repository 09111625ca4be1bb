//! Application services for the turn rotation context.

pub mod command_handlers;
pub mod query_handlers;
