//! Ad Entity

use chrono::{DateTime, Utc};
use kernel::id::{AdId, UserId};

#[derive(Debug, Clone)]
pub struct Ad {
    pub id: AdId,
    pub author_id: UserId,
    pub title: String,
    pub price: i64,
    pub description: Option<String>,
    pub image_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ad {
    pub fn new(author_id: UserId, title: String, price: i64, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: AdId::new(),
            author_id,
            title,
            price,
            description,
            image_ref: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, title: String, price: i64, description: Option<String>) {
        self.title = title;
        self.price = price;
        self.description = description;
        self.touch();
    }

    pub fn set_image_ref(&mut self, image_ref: Option<String>) {
        self.image_ref = image_ref;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
