//! Listings Router
//!
//! Browsing ads and their comments is open; everything that writes, and
//! the personalised `/ads/me`, re-authenticates through the same Basic
//! auth gate the identity routes use.

use crate::domain::repository::{AdRepository, CommentRepository};
use crate::infra::postgres::{PgAdRepository, PgCommentRepository};
use crate::presentation::handlers::{
    add_comment, create_ad, delete_ad, delete_comment, get_ad, list_ads, list_comments,
    list_my_ads, set_ad_image, update_ad, update_comment, ListingsState,
};
use axum::middleware::from_fn;
use axum::routing::{get, patch, post};
use axum::Router;
use identity::infra::postgres::PgUserStore;
use identity::presentation::middleware::{require_basic_auth, IdentityMiddlewareState};
use identity::{IdentityConfig, UserStore};
use sqlx::PgPool;
use std::sync::Arc;

pub fn listings_router(pool: PgPool, config: IdentityConfig) -> Router {
    listings_router_generic(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgAdRepository::new(pool.clone())),
        Arc::new(PgCommentRepository::new(pool)),
        Arc::new(config),
    )
}

pub fn listings_router_generic<U, A, C>(
    users: Arc<U>,
    ads: Arc<A>,
    comments: Arc<C>,
    config: Arc<IdentityConfig>,
) -> Router
where
    U: UserStore + Sync + Send + 'static,
    A: AdRepository + Sync + Send + 'static,
    C: CommentRepository + Sync + Send + 'static,
{
    let state = ListingsState {
        users: Arc::clone(&users),
        ads,
        comments,
    };
    let mw_state = IdentityMiddlewareState {
        store: users,
        config,
    };

    let public = Router::new()
        .route("/ads", get(list_ads::<U, A, C>))
        .route("/ads/{id}", get(get_ad::<U, A, C>))
        .route("/ads/{id}/comments", get(list_comments::<U, A, C>));

    let protected = Router::new()
        .route("/ads", post(create_ad::<U, A, C>))
        .route("/ads/me", get(list_my_ads::<U, A, C>))
        .route(
            "/ads/{id}",
            patch(update_ad::<U, A, C>).delete(delete_ad::<U, A, C>),
        )
        .route("/ads/{id}/image", patch(set_ad_image::<U, A, C>))
        .route("/ads/{id}/comments", post(add_comment::<U, A, C>))
        .route(
            "/ads/{id}/comments/{comment_id}",
            patch(update_comment::<U, A, C>).delete(delete_comment::<U, A, C>),
        )
        .route_layer(from_fn(move |req, next| {
            require_basic_auth(mw_state.clone(), req, next)
        }));

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
}
