//! Comment Use-Cases
//!
//! Comments hang off an ad; reads require the ad to exist, mutations are
//! owner-or-admin against the comment's author.

use crate::domain::entity::comment::Comment;
use crate::domain::repository::{AdRepository, CommentRepository};
use crate::error::{ListingsError, ListingsResult};
use identity::{AccessPolicy, Principal, UserRecord, UserStore};
use kernel::id::{AdId, CommentId};
use std::sync::Arc;

/// A comment joined with its author's record, ready for presentation.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub author: UserRecord,
}

pub struct CommentUseCase<U, A, C> {
    users: Arc<U>,
    ads: Arc<A>,
    comments: Arc<C>,
}

impl<U, A, C> Clone for CommentUseCase<U, A, C> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            ads: Arc::clone(&self.ads),
            comments: Arc::clone(&self.comments),
        }
    }
}

impl<U, A, C> CommentUseCase<U, A, C>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    pub fn new(users: Arc<U>, ads: Arc<A>, comments: Arc<C>) -> Self {
        Self {
            users,
            ads,
            comments,
        }
    }

    fn policy(&self) -> AccessPolicy<U> {
        AccessPolicy::new(Arc::clone(&self.users))
    }

    async fn require_ad(&self, ad_id: &AdId) -> ListingsResult<()> {
        self.ads
            .find_by_id(ad_id)
            .await?
            .ok_or(ListingsError::AdNotFound)?;
        Ok(())
    }

    async fn view_of(&self, comment: Comment) -> ListingsResult<CommentView> {
        let author = self.author_record(&comment).await?;
        Ok(CommentView { comment, author })
    }

    pub async fn list_for_ad(&self, ad_id: &AdId) -> ListingsResult<Vec<CommentView>> {
        self.require_ad(ad_id).await?;

        let comments = self.comments.list_by_ad(ad_id).await?;
        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            views.push(self.view_of(comment).await?);
        }
        Ok(views)
    }

    pub async fn add(
        &self,
        principal: Option<&Principal>,
        ad_id: &AdId,
        text: String,
    ) -> ListingsResult<CommentView> {
        let current = self.policy().resolve_current_user(principal).await?;
        self.require_ad(ad_id).await?;

        if text.trim().is_empty() {
            return Err(ListingsError::Validation("text must not be empty".into()));
        }

        let comment = Comment::new(*ad_id, current.id, text);
        let created = self.comments.create(&comment).await?;
        Ok(CommentView {
            comment: created,
            author: current,
        })
    }

    pub async fn update(
        &self,
        principal: Option<&Principal>,
        ad_id: &AdId,
        comment_id: &CommentId,
        text: String,
    ) -> ListingsResult<CommentView> {
        let mut comment = self.require_comment(ad_id, comment_id).await?;
        let author = self.author_record(&comment).await?;
        self.policy().check_owner_or_admin(principal, &author).await?;

        if text.trim().is_empty() {
            return Err(ListingsError::Validation("text must not be empty".into()));
        }

        comment.apply_update(text);
        let updated = self.comments.update(&comment).await?;
        Ok(CommentView {
            comment: updated,
            author,
        })
    }

    pub async fn delete(
        &self,
        principal: Option<&Principal>,
        ad_id: &AdId,
        comment_id: &CommentId,
    ) -> ListingsResult<()> {
        let comment = self.require_comment(ad_id, comment_id).await?;
        let author = self.author_record(&comment).await?;
        self.policy().check_owner_or_admin(principal, &author).await?;

        self.comments.delete(comment_id).await
    }

    /// Non-throwing ownership probe; missing ad or comment reads as
    /// `false`, and a comment filed under a different ad does too.
    pub async fn is_owner(
        &self,
        principal: Option<&Principal>,
        ad_id: &AdId,
        comment_id: &CommentId,
    ) -> bool {
        let owner_id = match self.comments.find_by_id(comment_id).await {
            Ok(Some(comment)) if comment.ad_id == *ad_id => Some(comment.author_id),
            _ => None,
        };
        self.policy().is_owner(principal, owner_id.as_ref()).await
    }

    async fn require_comment(
        &self,
        ad_id: &AdId,
        comment_id: &CommentId,
    ) -> ListingsResult<Comment> {
        self.require_ad(ad_id).await?;
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or(ListingsError::CommentNotFound)?;
        if comment.ad_id != *ad_id {
            return Err(ListingsError::CommentNotFound);
        }
        Ok(comment)
    }

    async fn author_record(&self, comment: &Comment) -> ListingsResult<UserRecord> {
        self.users
            .find_by_id(&comment.author_id)
            .await
            .map_err(ListingsError::Identity)?
            .ok_or_else(|| {
                ListingsError::Internal(format!("comment {} has no author record", comment.id))
            })
    }
}
