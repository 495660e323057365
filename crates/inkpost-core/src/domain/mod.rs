//! Domain entities - posts and the collection that holds them.

mod post;

pub use post::{Post, PostCollection, PostId};
