//! A lightweight actor that owns some state and mutates it one message at
//! a time.
//!
//! Every message is handled to completion before the next one is taken
//! from the inbox, so a handler never observes a half-applied update made
//! by another handler.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
mod handle;
mod message;
mod scheduler;

pub use error::ActorDeadError;
pub use handle::Actor;
pub use message::Message;
