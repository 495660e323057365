//! # Inkpost Core
//!
//! The domain layer of Inkpost.
//! Posts, the post collection, and the ports that storage backends implement.
//! No filesystem or network access happens in this crate.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, StoreError};
