//! In-Memory Listings Stores

use crate::domain::entity::ad::Ad;
use crate::domain::entity::comment::Comment;
use crate::domain::repository::{AdRepository, CommentRepository};
use crate::error::{ListingsError, ListingsResult};
use kernel::id::{AdId, CommentId, UserId};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryAdRepository {
    inner: Mutex<HashMap<AdId, Ad>>,
}

impl InMemoryAdRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<AdId, Ad>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AdRepository for InMemoryAdRepository {
    async fn create(&self, ad: &Ad) -> ListingsResult<Ad> {
        self.lock().insert(ad.id, ad.clone());
        Ok(ad.clone())
    }

    async fn find_by_id(&self, ad_id: &AdId) -> ListingsResult<Option<Ad>> {
        Ok(self.lock().get(ad_id).cloned())
    }

    async fn list_all(&self) -> ListingsResult<Vec<Ad>> {
        let mut ads: Vec<Ad> = self.lock().values().cloned().collect();
        ads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ads)
    }

    async fn list_by_author(&self, author_id: &UserId) -> ListingsResult<Vec<Ad>> {
        let mut ads: Vec<Ad> = self
            .lock()
            .values()
            .filter(|ad| ad.author_id == *author_id)
            .cloned()
            .collect();
        ads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ads)
    }

    async fn update(&self, ad: &Ad) -> ListingsResult<Ad> {
        let mut map = self.lock();
        if !map.contains_key(&ad.id) {
            return Err(ListingsError::AdNotFound);
        }
        map.insert(ad.id, ad.clone());
        Ok(ad.clone())
    }

    async fn delete(&self, ad_id: &AdId) -> ListingsResult<()> {
        self.lock().remove(ad_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCommentRepository {
    inner: Mutex<HashMap<CommentId, Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CommentId, Comment>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: &Comment) -> ListingsResult<Comment> {
        self.lock().insert(comment.id, comment.clone());
        Ok(comment.clone())
    }

    async fn find_by_id(&self, comment_id: &CommentId) -> ListingsResult<Option<Comment>> {
        Ok(self.lock().get(comment_id).cloned())
    }

    async fn list_by_ad(&self, ad_id: &AdId) -> ListingsResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .lock()
            .values()
            .filter(|c| c.ad_id == *ad_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn update(&self, comment: &Comment) -> ListingsResult<Comment> {
        let mut map = self.lock();
        if !map.contains_key(&comment.id) {
            return Err(ListingsError::CommentNotFound);
        }
        map.insert(comment.id, comment.clone());
        Ok(comment.clone())
    }

    async fn delete(&self, comment_id: &CommentId) -> ListingsResult<()> {
        self.lock().remove(comment_id);
        Ok(())
    }

    async fn delete_by_ad(&self, ad_id: &AdId) -> ListingsResult<()> {
        self.lock().retain(|_, c| c.ad_id != *ad_id);
        Ok(())
    }
}
