//! Bearer-token identity. Tokens are verified against an external
//! token-info endpoint; the verified subject is then resolved to a local
//! user row. Only `POST /api/auth/login` skips the active-status check,
//! every other endpoint goes through the `AuthUser` extractor.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Role, User, UserStatus};
use crate::state::AppState;
use crate::store::NewUser;

/// Claims extracted from a valid credential.
#[derive(Debug, Clone)]
pub struct VerifiedSubject {
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedSubject, ApiError>;
}

/// Verifies tokens by asking the provider's token-info endpoint. Invalid
/// or expired tokens come back as `Unauthenticated`; transport trouble is
/// a server error, not the caller's fault.
pub struct TokenInfoVerifier {
    client: reqwest::Client,
    endpoint: String,
    audience: Option<String>,
}

impl TokenInfoVerifier {
    pub fn new(endpoint: String, audience: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            audience,
        }
    }
}

#[derive(Deserialize)]
struct TokenClaims {
    sub: Option<String>,
    aud: Option<String>,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

#[async_trait]
impl TokenVerifier for TokenInfoVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedSubject, ApiError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("id_token", token)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "token verification transport failure");
                ApiError::Server
            })?;

        if !resp.status().is_success() {
            return Err(ApiError::Unauthenticated);
        }

        let claims: TokenClaims = resp
            .json()
            .await
            .map_err(|_| ApiError::Unauthenticated)?;

        if let Some(expected) = &self.audience {
            if claims.aud.as_deref() != Some(expected.as_str()) {
                return Err(ApiError::Unauthenticated);
            }
        }

        let subject = claims.sub.ok_or(ApiError::Unauthenticated)?;
        Ok(VerifiedSubject {
            subject,
            email: claims.email,
            name: claims.name,
            picture: claims.picture,
        })
    }
}

/// Fixed token-to-subject table. Backs the test suites and local runs
/// without a reachable identity provider.
#[derive(Default)]
pub struct StaticVerifier {
    tokens: RwLock<HashMap<String, VerifiedSubject>>,
}

impl StaticVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, token: &str, subject: VerifiedSubject) {
        self.tokens
            .write()
            .await
            .insert(token.to_string(), subject);
    }
}

#[async_trait]
impl TokenVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedSubject, ApiError> {
        self.tokens
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(ApiError::Unauthenticated)
    }
}

/// The resolved, active caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn require_role(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.0.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden("insufficient role"))
        }
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        self.require_role(&[Role::Admin])
    }

    pub fn require_instructor(&self) -> Result<(), ApiError> {
        self.require_role(&[Role::Instructor])
    }

    pub fn require_student(&self) -> Result<(), ApiError> {
        self.require_role(&[Role::Student, Role::Learner])
    }
}

/// Verify the credential and load the caller, rejecting anyone whose
/// account is not active yet.
pub async fn resolve_actor(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    let ident = state.verifier.verify(token).await?;
    let user = state
        .store
        .user_by_subject(&ident.subject)
        .await?
        .ok_or(ApiError::Unauthenticated)?;
    if user.status != UserStatus::Active {
        return Err(ApiError::AccountInactive);
    }
    Ok(AuthUser(user))
}

/// Login path: verify the credential and get-or-create the user row.
/// First sync lands as a pending student; no status check here, so a
/// pending user can still see who they are.
pub async fn sync_identity(state: &AppState, token: &str) -> Result<User, ApiError> {
    let ident = state.verifier.verify(token).await?;
    let user = state
        .store
        .upsert_user_by_subject(NewUser {
            subject: ident.subject,
            full_name: ident.name,
            email: ident.email,
            photo_url: ident.picture,
        })
        .await?;
    Ok(user)
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| ApiError::Unauthenticated)?;
        resolve_actor(state, bearer.token()).await
    }
}

/// Raw bearer token, for the one endpoint that resolves identity itself.
pub struct BearerToken(pub String);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| ApiError::Unauthenticated)?;
        Ok(BearerToken(bearer.token().to_string()))
    }
}
