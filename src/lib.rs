//! Cookbook: recipe step graphs as a page-turning book.
//!
//! Recipes are YAML documents of named step groups that merge into each
//! other. The scheduler lines the groups up into synchronized time frames,
//! one book page per frame.

pub mod cli;
pub mod core;
pub mod logging;
pub mod shelf;
pub mod source;
