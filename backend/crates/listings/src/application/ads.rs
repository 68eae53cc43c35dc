//! Ad Use-Cases
//!
//! Reads are open; every mutation is gated on owner-or-admin against the
//! author recorded on the ad. An ad whose author record has vanished is
//! corrupted state, not a 404.

use crate::domain::entity::ad::Ad;
use crate::domain::repository::{AdRepository, CommentRepository};
use crate::error::{ListingsError, ListingsResult};
use identity::{AccessPolicy, Principal, UserRecord, UserStore};
use kernel::id::AdId;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AdInput {
    pub title: String,
    pub price: i64,
    pub description: Option<String>,
}

impl AdInput {
    fn validated(self) -> ListingsResult<Self> {
        if self.title.trim().is_empty() {
            return Err(ListingsError::Validation("title must not be empty".into()));
        }
        if self.price < 0 {
            return Err(ListingsError::Validation(
                "price must not be negative".into(),
            ));
        }
        Ok(self)
    }
}

pub struct AdUseCase<U, A, C> {
    users: Arc<U>,
    ads: Arc<A>,
    comments: Arc<C>,
}

impl<U, A, C> Clone for AdUseCase<U, A, C> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            ads: Arc::clone(&self.ads),
            comments: Arc::clone(&self.comments),
        }
    }
}

impl<U, A, C> AdUseCase<U, A, C>
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

    async fn author_of(&self, ad: &Ad) -> ListingsResult<UserRecord> {
        self.users
            .find_by_id(&ad.author_id)
            .await
            .map_err(ListingsError::Identity)?
            .ok_or_else(|| {
                ListingsError::Internal(format!("ad {} has no author record", ad.id))
            })
    }

    pub async fn list_all(&self) -> ListingsResult<Vec<Ad>> {
        self.ads.list_all().await
    }

    pub async fn list_mine(&self, principal: Option<&Principal>) -> ListingsResult<Vec<Ad>> {
        let current = self.policy().resolve_current_user(principal).await?;
        self.ads.list_by_author(&current.id).await
    }

    pub async fn get_extended(&self, ad_id: &AdId) -> ListingsResult<(Ad, UserRecord)> {
        let ad = self
            .ads
            .find_by_id(ad_id)
            .await?
            .ok_or(ListingsError::AdNotFound)?;
        let author = self.author_of(&ad).await?;
        Ok((ad, author))
    }

    pub async fn create(
        &self,
        principal: Option<&Principal>,
        input: AdInput,
    ) -> ListingsResult<Ad> {
        let current = self.policy().resolve_current_user(principal).await?;
        let input = input.validated()?;

        let ad = Ad::new(current.id, input.title, input.price, input.description);
        let created = self.ads.create(&ad).await?;
        tracing::info!(ad_id = %created.id, "ad created");
        Ok(created)
    }

    pub async fn update(
        &self,
        principal: Option<&Principal>,
        ad_id: &AdId,
        input: AdInput,
    ) -> ListingsResult<Ad> {
        let mut ad = self
            .ads
            .find_by_id(ad_id)
            .await?
            .ok_or(ListingsError::AdNotFound)?;

        let author = self.author_of(&ad).await?;
        self.policy().check_owner_or_admin(principal, &author).await?;

        let input = input.validated()?;
        ad.apply_update(input.title, input.price, input.description);
        self.ads.update(&ad).await
    }

    pub async fn set_image_ref(
        &self,
        principal: Option<&Principal>,
        ad_id: &AdId,
        image_ref: Option<String>,
    ) -> ListingsResult<Ad> {
        let mut ad = self
            .ads
            .find_by_id(ad_id)
            .await?
            .ok_or(ListingsError::AdNotFound)?;

        let author = self.author_of(&ad).await?;
        self.policy().check_owner_or_admin(principal, &author).await?;

        ad.set_image_ref(image_ref);
        self.ads.update(&ad).await
    }

    pub async fn delete(&self, principal: Option<&Principal>, ad_id: &AdId) -> ListingsResult<()> {
        let ad = self
            .ads
            .find_by_id(ad_id)
            .await?
            .ok_or(ListingsError::AdNotFound)?;

        let author = self.author_of(&ad).await?;
        self.policy().check_owner_or_admin(principal, &author).await?;

        self.comments.delete_by_ad(ad_id).await?;
        self.ads.delete(ad_id).await?;
        tracing::info!(ad_id = %ad.id, "ad deleted");
        Ok(())
    }

    /// Non-throwing ownership probe; a missing ad reads as `false`.
    pub async fn is_owner(&self, principal: Option<&Principal>, ad_id: &AdId) -> bool {
        let owner_id = match self.ads.find_by_id(ad_id).await {
            Ok(ad) => ad.map(|a| a.author_id),
            Err(_) => None,
        };
        self.policy().is_owner(principal, owner_id.as_ref()).await
    }
}
