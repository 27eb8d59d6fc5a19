//! Core logic: per-session fact stores, the fetch-and-remember action, and
//! tools that expose it to an orchestration layer.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod error;
mod fact_client;
mod handler;
mod registry;
pub mod tool;

pub use error::{ActionError, LookupError};
pub use handler::ActionHandler;
pub use registry::{SessionId, SessionRegistry};
