//! Basic-Auth Middleware
//!
//! Every protected request re-authenticates from the `Authorization`
//! header; there are no sessions or bearer tokens to revoke. On success
//! the verified `Principal` rides the request extensions into handlers.

use crate::application::config::IdentityConfig;
use crate::application::directory::UserDirectory;
use crate::application::login::LoginUseCase;
use crate::domain::principal::Principal;
use crate::domain::repository::UserStore;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::basic_auth::{challenge, extract_basic_credentials};
use std::sync::Arc;

pub struct IdentityMiddlewareState<S> {
    pub store: Arc<S>,
    pub config: Arc<IdentityConfig>,
}

impl<S> Clone for IdentityMiddlewareState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

fn unauthorized(realm: &str) -> Response {
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header(header::WWW_AUTHENTICATE, challenge(realm))
        .body(Body::empty())
        .unwrap_or_else(|_| StatusCode::UNAUTHORIZED.into_response())
}

pub async fn require_basic_auth<S: UserStore + Sync + Send + 'static>(
    state: IdentityMiddlewareState<S>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let realm = state.config.realm.clone();

    let credentials = match extract_basic_credentials(req.headers()) {
        Ok(credentials) => credentials,
        Err(err) => {
            tracing::debug!(error = %err, "basic auth extraction failed");
            return Err(unauthorized(&realm));
        }
    };

    let directory = UserDirectory::new(Arc::clone(&state.store));
    let login = LoginUseCase::new(directory.clone(), Arc::clone(&state.config));

    let verified = login
        .execute(&credentials.username, credentials.password.clone())
        .await
        .map_err(IntoResponse::into_response)?;
    if !verified {
        return Err(unauthorized(&realm));
    }

    let view = directory
        .load_by_identifier(&credentials.username)
        .await
        .map_err(IntoResponse::into_response)?;

    let principal = Principal::new(view.identifier, [view.authority]);
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
