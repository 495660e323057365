//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod clock;
mod post_store;

pub use clock::Clock;
pub use post_store::PostStore;
