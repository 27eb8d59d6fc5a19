//! A set of built-in tools that models can use.

mod fetch_fact;

pub use fetch_fact::FetchFactTool;
