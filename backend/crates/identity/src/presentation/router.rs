//! Identity Router
//!
//! `/login` and `/register` are the only open routes; everything under
//! `/users` re-authenticates per request via Basic auth.

use crate::application::config::IdentityConfig;
use crate::domain::repository::UserStore;
use crate::infra::postgres::PgUserStore;
use crate::presentation::handlers::{
    current_user, delete_user, login, register, reset_password, set_password, update_user,
    IdentityState,
};
use crate::presentation::middleware::{require_basic_auth, IdentityMiddlewareState};
use axum::middleware::from_fn;
use axum::routing::{delete, get, post};
use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;

pub fn identity_router(pool: PgPool, config: IdentityConfig) -> Router {
    identity_router_generic(Arc::new(PgUserStore::new(pool)), Arc::new(config))
}

pub fn identity_router_generic<S: UserStore + Sync + Send + 'static>(
    store: Arc<S>,
    config: Arc<IdentityConfig>,
) -> Router {
    let state = IdentityState {
        store: Arc::clone(&store),
        config: Arc::clone(&config),
    };
    let mw_state = IdentityMiddlewareState { store, config };

    let public = Router::new()
        .route("/login", post(login::<S>))
        .route("/register", post(register::<S>));

    let protected = Router::new()
        .route("/users/me", get(current_user::<S>).patch(update_user::<S>))
        .route("/users/set_password", post(set_password::<S>))
        .route("/users/{email}/reset_password", post(reset_password::<S>))
        .route("/users/{email}", delete(delete_user::<S>))
        .route_layer(from_fn(move |req, next| {
            require_basic_auth(mw_state.clone(), req, next)
        }));

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
}
