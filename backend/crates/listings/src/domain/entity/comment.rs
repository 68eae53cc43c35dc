//! Comment Entity

use chrono::{DateTime, Utc};
use kernel::id::{AdId, CommentId, UserId};

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub ad_id: AdId,
    pub author_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(ad_id: AdId, author_id: UserId, text: String) -> Self {
        Self {
            id: CommentId::new(),
            ad_id,
            author_id,
            text,
            created_at: Utc::now(),
        }
    }

    pub fn apply_update(&mut self, text: String) {
        self.text = text;
    }
}
