//! Listings DTOs

use crate::application::comments::CommentView;
use crate::domain::entity::ad::Ad;
use identity::UserRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrUpdateAdRequest {
    pub title: String,
    pub price: i64,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrUpdateCommentRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdResponse {
    pub pk: Uuid,
    pub author: Uuid,
    pub image: Option<String>,
    pub price: i64,
    pub title: String,
}

impl AdResponse {
    pub fn from_ad(ad: &Ad) -> Self {
        Self {
            pk: ad.id.into_uuid(),
            author: ad.author_id.into_uuid(),
            image: ad.image_ref.clone(),
            price: ad.price,
            title: ad.title.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdsResponse {
    pub count: usize,
    pub results: Vec<AdResponse>,
}

impl AdsResponse {
    pub fn from_ads(ads: &[Ad]) -> Self {
        Self {
            count: ads.len(),
            results: ads.iter().map(AdResponse::from_ad).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedAdResponse {
    pub pk: Uuid,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub description: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub price: i64,
    pub title: String,
}

impl ExtendedAdResponse {
    pub fn from_parts(ad: &Ad, author: &UserRecord) -> Self {
        Self {
            pk: ad.id.into_uuid(),
            author_first_name: author.first_name.clone(),
            author_last_name: author.last_name.clone(),
            description: ad.description.clone(),
            email: author.email.as_str().to_string(),
            image: ad.image_ref.clone(),
            phone: author.phone.clone(),
            price: ad.price,
            title: ad.title.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub pk: Uuid,
    pub author: Uuid,
    pub author_image: Option<String>,
    pub author_first_name: Option<String>,
    /// Creation instant in epoch milliseconds
    pub created_at: i64,
    pub text: String,
}

impl CommentResponse {
    pub fn from_view(view: &CommentView) -> Self {
        Self {
            pk: view.comment.id.into_uuid(),
            author: view.author.id.into_uuid(),
            author_image: view.author.avatar_ref.clone(),
            author_first_name: view.author.first_name.clone(),
            created_at: view.comment.created_at.timestamp_millis(),
            text: view.comment.text.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsResponse {
    pub count: usize,
    pub results: Vec<CommentResponse>,
}

impl CommentsResponse {
    pub fn from_views(views: &[CommentView]) -> Self {
        Self {
            count: views.len(),
            results: views.iter().map(CommentResponse::from_view).collect(),
        }
    }
}
