//! Shared vocabulary for fetching and remembering pet facts.
//!
//! This crate establishes the types that every other crate in the
//! workspace agrees on: which facts exist, how the latest ones are kept
//! per session, what a fact source must look like, and what an action
//! reports back to whoever triggered it.
//!
//! Types in this crate don't perform any I/O. Sources that actually talk
//! to the network live in their own crates and implement [`FactSource`].

#![deny(missing_docs)]

mod error;
mod kind;
mod outcome;
mod request;
mod source;
mod store;

pub use error::*;
pub use kind::*;
pub use outcome::*;
pub use request::*;
pub use source::*;
pub use store::*;
