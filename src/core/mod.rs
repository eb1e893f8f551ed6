//! Core logic – the scroll/animation coordinator and everything it is built
//! from, plus the feed model.
//!
//! Nothing in this module depends on any TUI or rendering crate; time comes
//! from a [`clock::Clock`] so every behaviour can be driven by tests.

pub mod animation;
pub mod clock;
pub mod coordinator;
pub mod feed;
pub mod scheduler;
pub mod search;
pub mod store;
pub mod throttle;
pub mod viewport;
pub mod visibility;
