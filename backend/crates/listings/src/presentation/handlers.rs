//! Listings HTTP Handlers

use crate::application::ads::{AdInput, AdUseCase};
use crate::application::comments::CommentUseCase;
use crate::domain::repository::{AdRepository, CommentRepository};
use crate::error::ListingsError;
use crate::presentation::dto::{
    AdResponse, AdsResponse, CommentResponse, CommentsResponse, CreateOrUpdateAdRequest,
    CreateOrUpdateCommentRequest, ExtendedAdResponse,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use identity::{Principal, UserStore};
use kernel::id::{AdId, CommentId};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

pub struct ListingsState<U, A, C> {
    pub users: Arc<U>,
    pub ads: Arc<A>,
    pub comments: Arc<C>,
}

impl<U, A, C> Clone for ListingsState<U, A, C> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            ads: Arc::clone(&self.ads),
            comments: Arc::clone(&self.comments),
        }
    }
}

impl<U, A, C> ListingsState<U, A, C>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    fn ad_use_case(&self) -> AdUseCase<U, A, C> {
        AdUseCase::new(
            Arc::clone(&self.users),
            Arc::clone(&self.ads),
            Arc::clone(&self.comments),
        )
    }

    fn comment_use_case(&self) -> CommentUseCase<U, A, C> {
        CommentUseCase::new(
            Arc::clone(&self.users),
            Arc::clone(&self.ads),
            Arc::clone(&self.comments),
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAdImageRequest {
    pub image: Option<String>,
}

fn log_into_response(err: ListingsError) -> Response {
    err.log();
    err.into_response()
}

pub async fn list_ads<U, A, C>(
    State(state): State<ListingsState<U, A, C>>,
) -> Result<Json<AdsResponse>, Response>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    let ads = state
        .ad_use_case()
        .list_all()
        .await
        .map_err(log_into_response)?;
    Ok(Json(AdsResponse::from_ads(&ads)))
}

pub async fn list_my_ads<U, A, C>(
    State(state): State<ListingsState<U, A, C>>,
    principal: Option<Extension<Principal>>,
) -> Result<Json<AdsResponse>, Response>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    let ads = state
        .ad_use_case()
        .list_mine(principal.as_deref())
        .await
        .map_err(log_into_response)?;
    Ok(Json(AdsResponse::from_ads(&ads)))
}

pub async fn get_ad<U, A, C>(
    State(state): State<ListingsState<U, A, C>>,
    Path(ad_id): Path<Uuid>,
) -> Result<Json<ExtendedAdResponse>, Response>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    let (ad, author) = state
        .ad_use_case()
        .get_extended(&AdId::from(ad_id))
        .await
        .map_err(log_into_response)?;
    Ok(Json(ExtendedAdResponse::from_parts(&ad, &author)))
}

pub async fn create_ad<U, A, C>(
    State(state): State<ListingsState<U, A, C>>,
    principal: Option<Extension<Principal>>,
    Json(request): Json<CreateOrUpdateAdRequest>,
) -> Result<(StatusCode, Json<AdResponse>), Response>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    let ad = state
        .ad_use_case()
        .create(
            principal.as_deref(),
            AdInput {
                title: request.title,
                price: request.price,
                description: request.description,
            },
        )
        .await
        .map_err(log_into_response)?;
    Ok((StatusCode::CREATED, Json(AdResponse::from_ad(&ad))))
}

pub async fn update_ad<U, A, C>(
    State(state): State<ListingsState<U, A, C>>,
    principal: Option<Extension<Principal>>,
    Path(ad_id): Path<Uuid>,
    Json(request): Json<CreateOrUpdateAdRequest>,
) -> Result<Json<AdResponse>, Response>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    let ad = state
        .ad_use_case()
        .update(
            principal.as_deref(),
            &AdId::from(ad_id),
            AdInput {
                title: request.title,
                price: request.price,
                description: request.description,
            },
        )
        .await
        .map_err(log_into_response)?;
    Ok(Json(AdResponse::from_ad(&ad)))
}

pub async fn set_ad_image<U, A, C>(
    State(state): State<ListingsState<U, A, C>>,
    principal: Option<Extension<Principal>>,
    Path(ad_id): Path<Uuid>,
    Json(request): Json<SetAdImageRequest>,
) -> Result<Json<AdResponse>, Response>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    let ad = state
        .ad_use_case()
        .set_image_ref(principal.as_deref(), &AdId::from(ad_id), request.image)
        .await
        .map_err(log_into_response)?;
    Ok(Json(AdResponse::from_ad(&ad)))
}

pub async fn delete_ad<U, A, C>(
    State(state): State<ListingsState<U, A, C>>,
    principal: Option<Extension<Principal>>,
    Path(ad_id): Path<Uuid>,
) -> Result<StatusCode, Response>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    state
        .ad_use_case()
        .delete(principal.as_deref(), &AdId::from(ad_id))
        .await
        .map_err(log_into_response)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_comments<U, A, C>(
    State(state): State<ListingsState<U, A, C>>,
    Path(ad_id): Path<Uuid>,
) -> Result<Json<CommentsResponse>, Response>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    let views = state
        .comment_use_case()
        .list_for_ad(&AdId::from(ad_id))
        .await
        .map_err(log_into_response)?;
    Ok(Json(CommentsResponse::from_views(&views)))
}

pub async fn add_comment<U, A, C>(
    State(state): State<ListingsState<U, A, C>>,
    principal: Option<Extension<Principal>>,
    Path(ad_id): Path<Uuid>,
    Json(request): Json<CreateOrUpdateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), Response>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    let view = state
        .comment_use_case()
        .add(principal.as_deref(), &AdId::from(ad_id), request.text)
        .await
        .map_err(log_into_response)?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from_view(&view))))
}

pub async fn update_comment<U, A, C>(
    State(state): State<ListingsState<U, A, C>>,
    principal: Option<Extension<Principal>>,
    Path((ad_id, comment_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<CreateOrUpdateCommentRequest>,
) -> Result<Json<CommentResponse>, Response>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    let view = state
        .comment_use_case()
        .update(
            principal.as_deref(),
            &AdId::from(ad_id),
            &CommentId::from(comment_id),
            request.text,
        )
        .await
        .map_err(log_into_response)?;
    Ok(Json(CommentResponse::from_view(&view)))
}

pub async fn delete_comment<U, A, C>(
    State(state): State<ListingsState<U, A, C>>,
    principal: Option<Extension<Principal>>,
    Path((ad_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, Response>
where
    U: UserStore + Sync,
    A: AdRepository + Sync,
    C: CommentRepository + Sync,
{
    state
        .comment_use_case()
        .delete(
            principal.as_deref(),
            &AdId::from(ad_id),
            &CommentId::from(comment_id),
        )
        .await
        .map_err(log_into_response)?;
    Ok(StatusCode::NO_CONTENT)
}
