use super::prelude::*;

#[derive(Default)]
pub struct UserMutations;

#[Object]
impl UserMutations {
    /// Create a user profile without login credentials
    #[graphql(guard = "AuthGuard")]
    async fn add_user(
        &self,
        ctx: &Context<'_>,
        email: String,
        username: String,
        biography: String,
    ) -> Result<Option<User>> {
        let db = ctx.data_unchecked::<Database>();

        let record = db
            .users()
            .create(CreateUser {
                email,
                username,
                biography: Some(biography),
            })
            .await
            .map_err(db_error)?;

        tracing::info!(user_id = record.id, "User created");
        Ok(Some(record.into()))
    }

    /// Replace a user's profile fields
    #[graphql(guard = "AuthGuard")]
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        email: String,
        username: String,
        biography: String,
    ) -> Result<Option<User>> {
        let db = ctx.data_unchecked::<Database>();
        let id = parse_id(&id)?;

        let record = db
            .users()
            .update(
                id,
                UpdateUser {
                    email,
                    username,
                    biography: Some(biography),
                },
            )
            .await
            .map_err(db_error)?
            .ok_or_else(|| not_found("User", id))?;

        Ok(Some(record.into()))
    }

    /// Delete a user and its account
    #[graphql(guard = "AuthGuard")]
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        let db = ctx.data_unchecked::<Database>();
        let id = parse_id(&id)?;

        let record = db
            .users()
            .delete(id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| not_found("User", id))?;

        tracing::info!(user_id = id, "User deleted");
        Ok(Some(record.into()))
    }
}
