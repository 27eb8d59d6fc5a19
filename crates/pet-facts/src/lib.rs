//! An out-of-the-box assistant that fetches dog pictures and cat facts,
//! and remembers the latest ones per session.
//!
//! The crate includes a CLI tool for trying it in the terminal. And you
//! can also use it as a library to plug the tools into your own
//! orchestration layer.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod assistant;
pub mod tools;

pub use assistant::{Assistant, AssistantBuilder};

/// Re-exports of [`pet_facts_core`] crate.
pub mod core {
    pub use pet_facts_core::*;
}

/// Re-exports of [`pet_facts_model`] crate.
pub mod model {
    pub use pet_facts_model::*;
}
