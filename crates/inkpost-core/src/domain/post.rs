use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Post identifier - milliseconds since the Unix epoch at insertion time.
///
/// Rendered as a decimal string on disk and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(u64);

impl PostId {
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Post entity - a single submitted blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub content: String,
}

/// The full set of posts, persisted as one JSON object of `id -> content`.
///
/// Entries are kept ordered by id. Ids are allocated strictly increasing, so this
/// is also insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostCollection {
    posts: BTreeMap<PostId, String>,
}

impl PostCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a collection from its JSON encoding.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Pretty-printed JSON (2-space indent) with a trailing newline.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut out = serde_json::to_vec_pretty(self)?;
        out.push(b'\n');
        Ok(out)
    }

    /// Next free id: the clock reading, bumped past the newest existing id if needed.
    /// `None` once the newest id is `u64::MAX`.
    pub fn next_id(&self, now_millis: u64) -> Option<PostId> {
        match self.posts.keys().next_back() {
            Some(last) if last.0 >= now_millis => last.0.checked_add(1).map(PostId),
            _ => Some(PostId(now_millis)),
        }
    }

    /// Insert new content under a freshly allocated id. Never overwrites.
    pub fn append(&mut self, content: String, now_millis: u64) -> Result<Post, StoreError> {
        let id = self.next_id(now_millis).ok_or(StoreError::IdsExhausted)?;
        self.posts.insert(id, content.clone());
        Ok(Post { id, content })
    }

    pub fn get(&self, id: PostId) -> Option<Post> {
        self.posts.get(&id).map(|content| Post {
            id,
            content: content.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PostId, &str)> {
        self.posts.iter().map(|(id, content)| (*id, content.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legacy_file() {
        let raw = br#"{
  "1577836800000": "first",
  "1577836800123": "second"
}"#;
        let posts = PostCollection::from_json(raw).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(
            posts.get(PostId::new(1577836800123)).unwrap().content,
            "second"
        );
    }

    #[test]
    fn test_rejects_non_numeric_keys() {
        assert!(PostCollection::from_json(br#"{"abc": "x"}"#).is_err());
        assert!(PostCollection::from_json(br#"{"1": 5}"#).is_err());
        assert!(PostCollection::from_json(b"[]").is_err());
        assert!(PostCollection::from_json(b"").is_err());
    }

    #[test]
    fn test_pretty_output_is_ordered_by_id() {
        let mut posts = PostCollection::new();
        posts.append("b".to_string(), 2000).unwrap();
        posts.append("c".to_string(), 1500).unwrap();
        let mut older = PostCollection::from_json(br#"{"1000": "a"}"#).unwrap();
        older.append("b".to_string(), 2000).unwrap();

        let text = String::from_utf8(older.to_pretty_json().unwrap()).unwrap();
        assert_eq!(text, "{\n  \"1000\": \"a\",\n  \"2000\": \"b\"\n}\n");

        // 1500 is behind the newest id, so it is bumped rather than reused.
        let ids: Vec<u64> = posts.iter().map(|(id, _)| id.as_u64()).collect();
        assert_eq!(ids, vec![2000, 2001]);
    }

    #[test]
    fn test_same_millisecond_appends_keep_both() {
        let mut posts = PostCollection::new();
        let first = posts.append("one".to_string(), 42).unwrap();
        let second = posts.append("two".to_string(), 42).unwrap();

        assert_eq!(first.id, PostId::new(42));
        assert_eq!(second.id, PostId::new(43));
        assert_eq!(posts.len(), 2);
        assert_eq!(posts.get(first.id).unwrap().content, "one");
    }

    #[test]
    fn test_exhausted_ids_never_overwrite() {
        let mut posts = PostCollection::from_json(br#"{"18446744073709551615": "old"}"#).unwrap();

        assert_eq!(posts.next_id(1), None);
        assert!(matches!(
            posts.append("new".to_string(), 1),
            Err(StoreError::IdsExhausted)
        ));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts.get(PostId::new(u64::MAX)).unwrap().content, "old");
    }

    #[test]
    fn test_post_id_from_str() {
        assert_eq!("42".parse::<PostId>().unwrap(), PostId::new(42));
        assert!("forty-two".parse::<PostId>().is_err());
        assert!("-1".parse::<PostId>().is_err());
    }
}
