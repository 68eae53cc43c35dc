//! Identity HTTP Handlers

use crate::application::change_password::{ChangePasswordUseCase, SetNewPasswordUseCase};
use crate::application::config::IdentityConfig;
use crate::application::directory::UserDirectory;
use crate::application::login::LoginUseCase;
use crate::application::policy::AccessPolicy;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::domain::principal::Principal;
use crate::domain::repository::UserStore;
use crate::error::IdentityError;
use crate::presentation::dto::{
    LoginRequest, NewPasswordRequest, RegisterRequest, ResetPasswordRequest, UpdateUserRequest,
    UserResponse,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::sync::Arc;

pub struct IdentityState<S> {
    pub store: Arc<S>,
    pub config: Arc<IdentityConfig>,
}

impl<S> Clone for IdentityState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: UserStore + Sync> IdentityState<S> {
    fn directory(&self) -> UserDirectory<S> {
        UserDirectory::new(Arc::clone(&self.store))
    }

    fn policy(&self) -> AccessPolicy<S> {
        AccessPolicy::new(Arc::clone(&self.store))
    }
}

pub async fn login<S: UserStore + Sync>(
    State(state): State<IdentityState<S>>,
    Json(request): Json<LoginRequest>,
) -> Result<StatusCode, Response> {
    let use_case = LoginUseCase::new(state.directory(), Arc::clone(&state.config));
    let verified = use_case
        .execute(&request.username, request.password)
        .await
        .map_err(IntoResponse::into_response)?;

    if verified {
        Ok(StatusCode::OK)
    } else {
        Err(IdentityError::InvalidCredentials.into_response())
    }
}

pub async fn register<S: UserStore + Sync>(
    State(state): State<IdentityState<S>>,
    Json(request): Json<RegisterRequest>,
) -> Result<StatusCode, Response> {
    let use_case = RegisterUseCase::new(
        Arc::clone(&state.store),
        state.directory(),
        Arc::clone(&state.config),
    );
    let created = use_case
        .execute(RegisterInput {
            email: request.username,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
        })
        .await
        .map_err(IntoResponse::into_response)?;

    if created {
        Ok(StatusCode::CREATED)
    } else {
        Err(IdentityError::Rejected("registration rejected").into_response())
    }
}

pub async fn current_user<S: UserStore + Sync>(
    State(state): State<IdentityState<S>>,
    principal: Option<Extension<Principal>>,
) -> Result<Json<UserResponse>, Response> {
    let current = state
        .policy()
        .resolve_current_user(principal.as_deref())
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(Json(UserResponse::from_record(&current)))
}

pub async fn update_user<S: UserStore + Sync>(
    State(state): State<IdentityState<S>>,
    principal: Option<Extension<Principal>>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, Response> {
    let mut current = state
        .policy()
        .resolve_current_user(principal.as_deref())
        .await
        .map_err(IntoResponse::into_response)?;

    current.update_profile(request.first_name, request.last_name, request.phone);
    let saved = state
        .store
        .save(&current)
        .await
        .map_err(IntoResponse::into_response)?;

    Ok(Json(UserResponse::from_record(&saved)))
}

pub async fn set_password<S: UserStore + Sync>(
    State(state): State<IdentityState<S>>,
    principal: Option<Extension<Principal>>,
    Json(request): Json<NewPasswordRequest>,
) -> Result<StatusCode, Response> {
    let current = state
        .policy()
        .resolve_current_user(principal.as_deref())
        .await
        .map_err(IntoResponse::into_response)?;

    let use_case = ChangePasswordUseCase::new(
        Arc::clone(&state.store),
        state.directory(),
        Arc::clone(&state.config),
    );
    let changed = use_case
        .execute(
            current.email.as_str(),
            request.current_password,
            request.new_password,
        )
        .await
        .map_err(IntoResponse::into_response)?;

    if changed {
        Ok(StatusCode::OK)
    } else {
        Err(IdentityError::Rejected("password change rejected").into_response())
    }
}

pub async fn reset_password<S: UserStore + Sync>(
    State(state): State<IdentityState<S>>,
    principal: Option<Extension<Principal>>,
    Path(email): Path<String>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<StatusCode, Response> {
    let target = state
        .store
        .find_by_email(&email)
        .await
        .map_err(IntoResponse::into_response)?
        .ok_or_else(|| IdentityError::UserNotFound.into_response())?;

    state
        .policy()
        .check_owner_or_admin(principal.as_deref(), &target)
        .await
        .map_err(IntoResponse::into_response)?;

    let use_case = SetNewPasswordUseCase::new(
        Arc::clone(&state.store),
        state.directory(),
        Arc::clone(&state.config),
    );
    let changed = use_case
        .execute(target.email.as_str(), request.new_password)
        .await
        .map_err(IntoResponse::into_response)?;

    if changed {
        Ok(StatusCode::OK)
    } else {
        Err(IdentityError::Rejected("password reset rejected").into_response())
    }
}

pub async fn delete_user<S: UserStore + Sync>(
    State(state): State<IdentityState<S>>,
    principal: Option<Extension<Principal>>,
    Path(email): Path<String>,
) -> Result<StatusCode, Response> {
    if !state.policy().is_admin(principal.as_deref()) {
        return Err(IdentityError::Forbidden.into_response());
    }

    let directory = state.directory();
    if !directory.exists(&email).await.map_err(IntoResponse::into_response)? {
        return Err(IdentityError::UserNotFound.into_response());
    }

    directory.delete(&email).await.map_err(IntoResponse::into_response)?;
    Ok(StatusCode::NO_CONTENT)
}
