//! # Inkpost Infrastructure
//!
//! Concrete implementations of the ports defined in `inkpost-core`:
//! the JSON file post store, its in-memory counterpart, and the system clock.

pub mod clock;
pub mod store;

pub use clock::SystemClock;
pub use store::{InMemoryPostStore, JsonFilePostStore};
