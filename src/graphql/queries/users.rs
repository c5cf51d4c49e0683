use super::prelude::*;

#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// Get all users
    #[graphql(guard = "AuthGuard")]
    async fn get_all_users(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<User>>>> {
        let db = ctx.data_unchecked::<Database>();
        let records = db.users().list().await.map_err(db_error)?;

        Ok(Some(records.into_iter().map(|r| Some(User::from(r))).collect()))
    }

    /// Get a user by ID
    #[graphql(guard = "AuthGuard")]
    async fn get_user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        let db = ctx.data_unchecked::<Database>();
        let id = parse_id(&id)?;

        let record = db.users().get_by_id(id).await.map_err(db_error)?;
        Ok(record.map(User::from))
    }
}
