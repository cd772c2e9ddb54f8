//! Core recipe logic: types, parsing, scheduling, colours, pagination.

pub mod book;
pub mod palette;
pub mod parser;
pub mod scheduler;
pub mod types;
