//! State containers sitting between a `Repository` and whatever displays the data.
//!
//! Each piece of state is an immutable snapshot published on a `tokio::sync::watch` channel:
//! readers either take a copy of the current value or `subscribe()` and wait for changes.
//! Updates always go through, even when nobody is listening.
//!

pub use detail::*;
pub use map::*;

mod detail;
mod map;
