//! GraphQL authentication and authorization
//!
//! Binds each request to the user asserted by its bearer token, if any.
//!
//! The transport layer calls [`auth_user_from_headers`] (or uses the
//! [`OptionalAuthUser`] axum extractor) once per request and, when a user is
//! found, adds the [`AuthUser`] to the request data:
//!
//! ```ignore
//! let mut request = req.into_inner();
//! if let Some(user) = auth_user_from_headers(&headers, &tokens) {
//!     request = request.data(user);
//! }
//! schema.execute(request).await
//! ```
//!
//! Resolvers then call `ctx.auth_user()?` to require authentication.

use std::convert::Infallible;

use async_graphql::{Context, ErrorExtensions, Result};
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::services::TokenService;

/// User context extracted from a session token, available in GraphQL resolvers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Extract the raw token from an `Authorization` header.
///
/// The `Bearer ` prefix is optional; an empty value counts as no token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the request's user from its headers. Anonymous requests and
/// requests with an unusable token both yield `None`.
pub fn auth_user_from_headers(headers: &HeaderMap, tokens: &TokenService) -> Option<AuthUser> {
    let token = bearer_token(headers)?;
    tokens.verify(token).map(|user_id| AuthUser { user_id })
}

/// Axum extractor for the optional request user.
///
/// Reads the [`TokenService`] from the request extensions (add it with
/// `Extension(tokens)`); without it every request is anonymous.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<TokenService>()
            .and_then(|tokens| auth_user_from_headers(&parts.headers, tokens));
        Ok(Self(user))
    }
}

/// Error returned to clients that are not signed in
pub fn not_authenticated() -> async_graphql::Error {
    async_graphql::Error::new("Not authenticated")
        .extend_with(|_, e| e.set("code", "UNAUTHORIZED"))
}

/// Extension trait to get authenticated user from GraphQL context
pub trait AuthExt {
    /// Get the authenticated user, or return an error if not authenticated
    fn auth_user(&self) -> Result<&AuthUser>;
}

impl<'a> AuthExt for Context<'a> {
    fn auth_user(&self) -> Result<&AuthUser> {
        self.data_opt::<AuthUser>().ok_or_else(not_authenticated)
    }
}

/// Guard that requires authentication for GraphQL operations.
///
/// Use with `#[graphql(guard = "AuthGuard")]` on queries, mutations, or subscriptions.
pub struct AuthGuard;

impl async_graphql::Guard for AuthGuard {
    fn check(&self, ctx: &Context<'_>) -> impl std::future::Future<Output = Result<()>> + Send {
        let result = ctx.auth_user().map(|_| ());
        async move { result }
    }
}
