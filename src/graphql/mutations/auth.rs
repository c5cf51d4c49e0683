//! GraphQL authentication mutations
//!
//! signUp and signIn do not require authentication; both return an
//! `AuthPayload` whose token authenticates later requests.

use super::prelude::*;
use crate::services::{AuthService, SignUpInput};

#[derive(Default)]
pub struct AuthMutations;

#[Object]
impl AuthMutations {
    /// Create an account and its user profile
    async fn sign_up(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        username: String,
        biography: String,
    ) -> Result<AuthPayload> {
        let auth = ctx.data_unchecked::<AuthService>();

        let session = auth
            .sign_up(SignUpInput {
                email,
                password,
                username,
                biography: Some(biography),
            })
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Sign-up failed");
                auth_error(e)
            })?;

        Ok(session.into())
    }

    /// Authenticate with email and password
    async fn sign_in(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthPayload> {
        let auth = ctx.data_unchecked::<AuthService>();

        let session = auth.sign_in(&email, &password).await.map_err(|e| {
            tracing::warn!(error = %e, "Sign-in failed");
            auth_error(e)
        })?;

        Ok(session.into())
    }
}
