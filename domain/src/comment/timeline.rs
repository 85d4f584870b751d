//! Merged timeline - the globally time-sorted union of all generated comments

use crate::comment::Comment;
use serde::Serialize;

/// Chronologically sorted accumulation of comments for one run.
///
/// Each merged batch triggers a re-sort of the full set on the lexicographic
/// `time` field; the clock format is chosen so lexicographic order equals
/// chronological order. The sort is stable, so comments sharing a timestamp
/// keep their insertion order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    comments: Vec<Comment>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a batch of comments, re-establishing global time order.
    pub fn merge(&mut self, batch: Vec<Comment>) {
        self.comments.extend(batch);
        self.comments.sort_by(|a, b| a.time.cmp(&b.time));
    }

    pub fn as_slice(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter()
    }
}
