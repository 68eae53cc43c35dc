//! Listings Store Ports

use crate::domain::entity::ad::Ad;
use crate::domain::entity::comment::Comment;
use crate::error::ListingsResult;
use kernel::id::{AdId, CommentId, UserId};

#[trait_variant::make(AdRepository: Send)]
pub trait LocalAdRepository {
    async fn create(&self, ad: &Ad) -> ListingsResult<Ad>;

    async fn find_by_id(&self, ad_id: &AdId) -> ListingsResult<Option<Ad>>;

    /// All ads, newest first.
    async fn list_all(&self) -> ListingsResult<Vec<Ad>>;

    async fn list_by_author(&self, author_id: &UserId) -> ListingsResult<Vec<Ad>>;

    async fn update(&self, ad: &Ad) -> ListingsResult<Ad>;

    async fn delete(&self, ad_id: &AdId) -> ListingsResult<()>;
}

#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn create(&self, comment: &Comment) -> ListingsResult<Comment>;

    async fn find_by_id(&self, comment_id: &CommentId) -> ListingsResult<Option<Comment>>;

    /// Comments on one ad, newest first.
    async fn list_by_ad(&self, ad_id: &AdId) -> ListingsResult<Vec<Comment>>;

    async fn update(&self, comment: &Comment) -> ListingsResult<Comment>;

    async fn delete(&self, comment_id: &CommentId) -> ListingsResult<()>;

    /// Removes every comment on an ad; runs when the ad itself goes.
    async fn delete_by_ad(&self, ad_id: &AdId) -> ListingsResult<()>;
}
